use chrono::Utc;
use serde::{Deserialize, Serialize};
use strum::Display;

/// One GPS-tagged observation event and the cells seen during it.
///
/// The collector records exactly one cell per measurement today; the
/// container leaves room for multi-cell captures.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    /// Epoch millis of the observation.
    pub measured_at: i64,
    pub latitude: f64,
    pub longitude: f64,
    /// Meters above sea level.
    pub gps_altitude: f64,
    /// Meters.
    pub gps_accuracy: f32,
    /// Degrees.
    pub gps_bearing: f32,
    /// Meters per second.
    pub gps_speed: f32,
    pub cells: Vec<Cell>,
}

/// One radio observation owned by its parent measurement. Identity and
/// signal are recorded independently; a cell fresh out of the builder has
/// neither.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Cell {
    pub identity: Option<CellIdentity>,
    pub signal: Option<CellSignal>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "radio", rename_all = "lowercase")]
pub enum CellIdentity {
    Gsm {
        mcc: i32,
        mnc: i32,
        lac: i32,
        cid: i32,
    },
    Wcdma {
        mcc: i32,
        mnc: i32,
        lac: i32,
        cid: i32,
        psc: i32,
    },
    Lte {
        mcc: i32,
        mnc: i32,
        tac: i32,
        ci: i32,
        pci: i32,
    },
    // legacy numbering space, no mcc/mnc
    Cdma {
        sid: i32,
        nid: i32,
        bid: i32,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "radio", rename_all = "lowercase")]
pub enum CellSignal {
    Gsm { asu: i32, dbm: i32 },
    Wcdma { asu: i32, dbm: i32 },
    Lte { asu: i32, dbm: i32, ta: i32 },
    Cdma { asu: i32, dbm: i32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize, Deserialize)]
#[strum(serialize_all = "UPPERCASE")]
pub enum NetworkGroup {
    Gsm,
    Wcdma,
    Lte,
    Cdma,
}

impl Cell {
    pub fn network_group(&self) -> Option<NetworkGroup> {
        self.identity.map(|identity| match identity {
            CellIdentity::Gsm { .. } => NetworkGroup::Gsm,
            CellIdentity::Wcdma { .. } => NetworkGroup::Wcdma,
            CellIdentity::Lte { .. } => NetworkGroup::Lte,
            CellIdentity::Cdma { .. } => NetworkGroup::Cdma,
        })
    }
}

/// Fluent assembly of one measurement with a single cell.
///
/// Identity and signal setters replace whatever was stored before, so a
/// second identity call wins, technology tag included. Nothing checks that
/// a signal matches the recorded identity; that discipline stays with the
/// caller.
#[derive(Debug)]
pub struct MeasurementBuilder {
    measurement: Measurement,
    cell: Cell,
}

impl MeasurementBuilder {
    pub fn new() -> Self {
        Self {
            measurement: Measurement {
                measured_at: Utc::now().timestamp_millis(),
                latitude: 0.0,
                longitude: 0.0,
                gps_altitude: 0.0,
                gps_accuracy: 0.0,
                gps_bearing: 0.0,
                gps_speed: 0.0,
                cells: Vec::new(),
            },
            cell: Cell::default(),
        }
    }

    pub fn build(mut self) -> Measurement {
        self.measurement.cells.push(self.cell);
        self.measurement
    }

    pub fn gsm_cell(mut self, mcc: i32, mnc: i32, lac: i32, cid: i32) -> Self {
        self.cell.identity = Some(CellIdentity::Gsm { mcc, mnc, lac, cid });
        self
    }

    pub fn wcdma_cell(mut self, mcc: i32, mnc: i32, lac: i32, cid: i32, psc: i32) -> Self {
        self.cell.identity = Some(CellIdentity::Wcdma {
            mcc,
            mnc,
            lac,
            cid,
            psc,
        });
        self
    }

    pub fn lte_cell(mut self, mcc: i32, mnc: i32, tac: i32, ci: i32, pci: i32) -> Self {
        self.cell.identity = Some(CellIdentity::Lte {
            mcc,
            mnc,
            tac,
            ci,
            pci,
        });
        self
    }

    pub fn cdma_cell(mut self, sid: i32, nid: i32, bid: i32) -> Self {
        self.cell.identity = Some(CellIdentity::Cdma { sid, nid, bid });
        self
    }

    pub fn gsm_signal(mut self, asu: i32, dbm: i32) -> Self {
        self.cell.signal = Some(CellSignal::Gsm { asu, dbm });
        self
    }

    pub fn wcdma_signal(mut self, asu: i32, dbm: i32) -> Self {
        self.cell.signal = Some(CellSignal::Wcdma { asu, dbm });
        self
    }

    pub fn lte_signal(mut self, asu: i32, dbm: i32, ta: i32) -> Self {
        self.cell.signal = Some(CellSignal::Lte { asu, dbm, ta });
        self
    }

    pub fn cdma_signal(mut self, asu: i32, dbm: i32) -> Self {
        self.cell.signal = Some(CellSignal::Cdma { asu, dbm });
        self
    }

    pub fn location(mut self, latitude: f64, longitude: f64, altitude: f64, accuracy: f32) -> Self {
        self.measurement.latitude = latitude;
        self.measurement.longitude = longitude;
        self.measurement.gps_altitude = altitude;
        self.measurement.gps_accuracy = accuracy;
        self
    }

    pub fn movement(mut self, bearing: f32, speed: f32) -> Self {
        self.measurement.gps_bearing = bearing;
        self.measurement.gps_speed = speed;
        self
    }

    pub fn time(mut self, timestamp: i64) -> Self {
        self.measurement.measured_at = timestamp;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gsm() {
        let m = MeasurementBuilder::new()
            .gsm_cell(260, 2, 58140, 42305)
            .gsm_signal(16, -81)
            .build();
        assert_eq!(m.cells.len(), 1);
        let c = &m.cells[0];
        assert_eq!(c.network_group(), Some(NetworkGroup::Gsm));
        assert_eq!(
            c.identity,
            Some(CellIdentity::Gsm {
                mcc: 260,
                mnc: 2,
                lac: 58140,
                cid: 42305
            })
        );
        assert_eq!(c.signal, Some(CellSignal::Gsm { asu: 16, dbm: -81 }));
    }

    #[test]
    fn wcdma() {
        let m = MeasurementBuilder::new()
            .wcdma_cell(260, 3, 33333, 1900110, 122)
            .wcdma_signal(9, -95)
            .build();
        let c = &m.cells[0];
        assert_eq!(c.network_group(), Some(NetworkGroup::Wcdma));
        assert_eq!(
            c.identity,
            Some(CellIdentity::Wcdma {
                mcc: 260,
                mnc: 3,
                lac: 33333,
                cid: 1900110,
                psc: 122
            })
        );
        assert_eq!(c.signal, Some(CellSignal::Wcdma { asu: 9, dbm: -95 }));
    }

    #[test]
    fn lte() {
        let m = MeasurementBuilder::new()
            .lte_cell(260, 6, 20100, 27447553, 301)
            .lte_signal(40, -100, 2)
            .build();
        let c = &m.cells[0];
        assert_eq!(c.network_group(), Some(NetworkGroup::Lte));
        assert_eq!(
            c.identity,
            Some(CellIdentity::Lte {
                mcc: 260,
                mnc: 6,
                tac: 20100,
                ci: 27447553,
                pci: 301
            })
        );
        assert_eq!(
            c.signal,
            Some(CellSignal::Lte {
                asu: 40,
                dbm: -100,
                ta: 2
            })
        );
    }

    #[test]
    fn cdma() {
        let m = MeasurementBuilder::new()
            .cdma_cell(4, 7, 911)
            .cdma_signal(8, -92)
            .build();
        let c = &m.cells[0];
        assert_eq!(c.network_group(), Some(NetworkGroup::Cdma));
        assert_eq!(
            c.identity,
            Some(CellIdentity::Cdma {
                sid: 4,
                nid: 7,
                bid: 911
            })
        );
        assert_eq!(c.signal, Some(CellSignal::Cdma { asu: 8, dbm: -92 }));
    }

    #[test]
    fn last_identity_wins() {
        let m = MeasurementBuilder::new()
            .gsm_cell(260, 2, 58140, 42305)
            .lte_cell(260, 6, 20100, 27447553, 301)
            .build();
        assert_eq!(m.cells[0].network_group(), Some(NetworkGroup::Lte));
    }

    #[test]
    fn mismatched_signal_is_kept() {
        // nothing rejects a signal recorded for another technology
        let m = MeasurementBuilder::new()
            .gsm_cell(260, 2, 58140, 42305)
            .lte_signal(40, -100, 2)
            .build();
        let c = &m.cells[0];
        assert_eq!(c.network_group(), Some(NetworkGroup::Gsm));
        assert_eq!(
            c.signal,
            Some(CellSignal::Lte {
                asu: 40,
                dbm: -100,
                ta: 2
            })
        );
    }

    #[test]
    fn gps_fix() {
        let m = MeasurementBuilder::new()
            .location(52.2297, 21.0122, 110.0, 4.5)
            .movement(180.0, 1.2)
            .time(1_700_000_000_000)
            .gsm_cell(260, 2, 58140, 42305)
            .build();
        assert_eq!(m.latitude, 52.2297);
        assert_eq!(m.longitude, 21.0122);
        assert_eq!(m.gps_altitude, 110.0);
        assert_eq!(m.gps_accuracy, 4.5);
        assert_eq!(m.gps_bearing, 180.0);
        assert_eq!(m.gps_speed, 1.2);
        assert_eq!(m.measured_at, 1_700_000_000_000);
    }

    #[test]
    fn defaults_to_current_time() {
        let before = Utc::now().timestamp_millis();
        let m = MeasurementBuilder::new().build();
        let after = Utc::now().timestamp_millis();
        assert!(m.measured_at >= before && m.measured_at <= after);
    }
}
