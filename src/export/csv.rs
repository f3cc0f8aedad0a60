use std::io::Write;

use anyhow::Result;
use serde::Serialize;

use crate::measurement::{CellIdentity, CellSignal, Measurement, NetworkGroup};

/// One row per observed cell. Column layout follows the MLS cell list
/// convention: lac/tac land in `area`, cid/ci in `cell`, psc/pci in
/// `unit`, and CDMA fills `mnc`/`area`/`cell` with sid/nid/bid. Columns
/// that have no meaning for a technology stay empty.
#[derive(Debug, Serialize)]
struct Row {
    measured_at: i64,
    lat: f64,
    lon: f64,
    altitude: f64,
    accuracy: f32,
    bearing: f32,
    speed: f32,
    radio: String,
    mcc: Option<i32>,
    mnc: Option<i32>,
    area: Option<i32>,
    cell: Option<i32>,
    unit: Option<i32>,
    asu: Option<i32>,
    dbm: Option<i32>,
    ta: Option<i32>,
}

pub fn write(writer: impl Write, measurements: &[Measurement]) -> Result<()> {
    let mut writer = csv::Writer::from_writer(writer);
    for m in measurements {
        for c in &m.cells {
            let Some(identity) = c.identity else {
                continue;
            };
            let (radio, mcc, mnc, area, cell, unit) = match identity {
                CellIdentity::Gsm { mcc, mnc, lac, cid } => {
                    (NetworkGroup::Gsm, Some(mcc), Some(mnc), Some(lac), Some(cid), None)
                }
                CellIdentity::Wcdma {
                    mcc,
                    mnc,
                    lac,
                    cid,
                    psc,
                } => (
                    NetworkGroup::Wcdma,
                    Some(mcc),
                    Some(mnc),
                    Some(lac),
                    Some(cid),
                    Some(psc),
                ),
                CellIdentity::Lte {
                    mcc,
                    mnc,
                    tac,
                    ci,
                    pci,
                } => (
                    NetworkGroup::Lte,
                    Some(mcc),
                    Some(mnc),
                    Some(tac),
                    Some(ci),
                    Some(pci),
                ),
                CellIdentity::Cdma { sid, nid, bid } => {
                    (NetworkGroup::Cdma, None, Some(sid), Some(nid), Some(bid), None)
                }
            };
            let (asu, dbm, ta) = match c.signal {
                Some(CellSignal::Gsm { asu, dbm })
                | Some(CellSignal::Wcdma { asu, dbm })
                | Some(CellSignal::Cdma { asu, dbm }) => (Some(asu), Some(dbm), None),
                Some(CellSignal::Lte { asu, dbm, ta }) => (Some(asu), Some(dbm), Some(ta)),
                None => (None, None, None),
            };

            writer.serialize(Row {
                measured_at: m.measured_at,
                lat: m.latitude,
                lon: m.longitude,
                altitude: m.gps_altitude,
                accuracy: m.gps_accuracy,
                bearing: m.gps_bearing,
                speed: m.gps_speed,
                radio: radio.to_string(),
                mcc,
                mnc,
                area,
                cell,
                unit,
                asu,
                dbm,
                ta,
            })?;
        }
    }
    writer.flush()?;
    Ok(())
}
