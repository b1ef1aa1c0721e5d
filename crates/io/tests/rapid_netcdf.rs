//! Integration tests for the RAPID Qout and return-period readers.
//!
//! Fixtures are written programmatically with `netcdf::create`.

use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use floodprep_io::{
    DischargeSource, IoError, QoutLayout, RapidDataset, ReturnPeriod, parse_datetime,
    read_return_periods,
};
use ndarray::array;
use tempfile::tempdir;

// ---------------------------------------------------------------------------
// Helper: programmatic Qout fixture builder
// ---------------------------------------------------------------------------

struct QoutFixture {
    id_var: &'static str,
    ids: Vec<i32>,
    nt: usize,
    layout: QoutLayout,
    time_units: Option<&'static str>,
    /// Discharge in `[reach][time]` order.
    qout: Vec<Vec<f64>>,
}

impl QoutFixture {
    fn new(ids: Vec<i32>, nt: usize) -> Self {
        let qout = ids
            .iter()
            .enumerate()
            .map(|(r, _)| (0..nt).map(|t| (r * 100 + t) as f64).collect())
            .collect();
        Self {
            id_var: "rivid",
            ids,
            nt,
            layout: QoutLayout::TimeMajor,
            time_units: Some("hours since 2020-01-01 00:00:00"),
            qout,
        }
    }

    fn with_layout(mut self, layout: QoutLayout) -> Self {
        self.layout = layout;
        self
    }

    fn with_id_var(mut self, name: &'static str) -> Self {
        self.id_var = name;
        self
    }

    fn without_time(mut self) -> Self {
        self.time_units = None;
        self
    }

    fn write(&self, dir: &Path, name: &str) -> PathBuf {
        let path = dir.join(name);
        let mut file = netcdf::create(&path).expect("failed to create NetCDF file");
        let nr = self.ids.len();

        file.add_dimension("time", self.nt).expect("add dim time");
        file.add_dimension(self.id_var, nr).expect("add dim rivid");

        {
            let mut var = file
                .add_variable::<i32>(self.id_var, &[self.id_var])
                .expect("add var rivid");
            var.put_values(&self.ids, ..).expect("put rivid values");
        }

        if let Some(units) = self.time_units {
            let time_vals: Vec<f64> = (0..self.nt).map(|t| (t * 3) as f64).collect();
            let mut var = file
                .add_variable::<f64>("time", &["time"])
                .expect("add var time");
            var.put_values(&time_vals, ..).expect("put time values");
            var.put_attribute("units", units).expect("add time units");
        }

        let (dims, flat): ([&str; 2], Vec<f64>) = match self.layout {
            QoutLayout::TimeMajor => (
                ["time", self.id_var],
                (0..self.nt)
                    .flat_map(|t| self.qout.iter().map(move |row| row[t]))
                    .collect(),
            ),
            QoutLayout::ReachMajor => (
                [self.id_var, "time"],
                self.qout.iter().flatten().copied().collect(),
            ),
        };
        let mut var = file
            .add_variable::<f64>("Qout", &dims)
            .expect("add var Qout");
        var.put_values(&flat, ..).expect("put Qout values");

        path
    }
}

fn dt(s: &str) -> NaiveDateTime {
    parse_datetime(s).unwrap()
}

// ---------------------------------------------------------------------------
// Qout
// ---------------------------------------------------------------------------

#[test]
fn time_major_extracts_reach_rows() {
    let dir = tempdir().unwrap();
    let path = QoutFixture::new(vec![10, 20, 30], 4).write(dir.path(), "Qout.nc");

    let ds = RapidDataset::open(&path).unwrap();
    assert_eq!(ds.layout(), QoutLayout::TimeMajor);
    assert_eq!(ds.size_time(), 4);
    assert_eq!(ds.ids(), &[10, 20, 30]);

    let subset = ds.subset_index_list(&[30, 99, 10]).unwrap();
    assert_eq!(subset.valid_ids, vec![30, 10]);
    assert_eq!(subset.missing_ids, vec![99]);

    let q = ds.qout(&subset.indices, None).unwrap();
    assert_eq!(
        q,
        array![[200.0, 201.0, 202.0, 203.0], [0.0, 1.0, 2.0, 3.0]]
    );
}

#[test]
fn reach_major_matches_time_major() {
    let dir = tempdir().unwrap();
    let a = QoutFixture::new(vec![1, 2], 5).write(dir.path(), "a.nc");
    let b = QoutFixture::new(vec![1, 2], 5)
        .with_layout(QoutLayout::ReachMajor)
        .write(dir.path(), "b.nc");

    let a = RapidDataset::open(&a).unwrap();
    let b = RapidDataset::open(&b).unwrap();
    assert_eq!(b.layout(), QoutLayout::ReachMajor);
    assert_eq!(
        a.qout(&[1, 0], Some(1..4)).unwrap(),
        b.qout(&[1, 0], Some(1..4)).unwrap()
    );
}

#[test]
fn time_window_from_cf_axis() {
    let dir = tempdir().unwrap();
    let path = QoutFixture::new(vec![1], 8).write(dir.path(), "Qout.nc");
    let ds = RapidDataset::open(&path).unwrap();

    // Steps are 3-hourly from 2020-01-01 00:00.
    let times = ds.times().unwrap();
    assert_eq!(times[2], dt("2020-01-01 06:00:00"));

    let range = ds
        .time_index_range(Some(dt("2020-01-01 05:00:00")), Some(dt("2020-01-01 12:00:00")))
        .unwrap();
    assert_eq!(range, Some(2..5));

    let err = ds
        .time_index_range(Some(dt("2021-01-01")), None)
        .unwrap_err();
    assert!(matches!(err, IoError::EmptyTimeWindow { .. }));
}

#[test]
fn comid_alias_and_missing_time() {
    let dir = tempdir().unwrap();
    let path = QoutFixture::new(vec![7, 8], 3)
        .with_id_var("COMID")
        .without_time()
        .write(dir.path(), "Qout.nc");

    let ds = RapidDataset::open(&path).unwrap();
    assert_eq!(ds.ids(), &[7, 8]);
    assert!(ds.times().is_none());
    assert_eq!(ds.time_index_range(None, None).unwrap(), None);
    assert!(ds.time_index_range(Some(dt("2020-01-01")), None).is_err());
}

#[test]
fn open_missing_file() {
    let err = RapidDataset::open(Path::new("/nonexistent/Qout.nc")).unwrap_err();
    assert!(matches!(err, IoError::FileNotFound { .. }));
}

// ---------------------------------------------------------------------------
// Return periods
// ---------------------------------------------------------------------------

fn write_return_periods(dir: &Path, with_max_flow: bool) -> PathBuf {
    let path = dir.join("return_periods.nc");
    let mut file = netcdf::create(&path).expect("failed to create NetCDF file");
    file.add_dimension("rivid", 3).expect("add dim rivid");
    {
        let mut var = file
            .add_variable::<i32>("rivid", &["rivid"])
            .expect("add var rivid");
        var.put_values(&[101, 102, 103], ..).expect("put rivid");
    }
    let mut columns = vec![
        ("return_period_2", [1.0, 2.0, 3.0]),
        ("return_period_10", [10.0, 20.0, 30.0]),
        ("return_period_20", [100.0, 200.0, 300.0]),
    ];
    if with_max_flow {
        columns.push(("max_flow", [5.0, 6.0, 7.0]));
    }
    for (name, values) in columns {
        let mut var = file
            .add_variable::<f64>(name, &["rivid"])
            .expect("add stat var");
        var.put_values(&values, ..).expect("put stat values");
    }
    path
}

#[test]
fn reads_requested_statistic() {
    let dir = tempdir().unwrap();
    let path = write_return_periods(dir.path(), true);

    let t = read_return_periods(&path, ReturnPeriod::Year10).unwrap();
    assert_eq!(t.get(102), Some(20.0));
    assert_eq!(t.get(99), None);

    let t = read_return_periods(&path, ReturnPeriod::MaxFlow).unwrap();
    assert_eq!(t.get(103), Some(7.0));
}

#[test]
fn max_flow_falls_back_to_two_year() {
    let dir = tempdir().unwrap();
    let path = write_return_periods(dir.path(), false);

    let t = read_return_periods(&path, ReturnPeriod::MaxFlow).unwrap();
    assert_eq!(t.get(101), Some(1.0));
}
