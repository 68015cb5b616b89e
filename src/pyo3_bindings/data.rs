use numpy::PyReadonlyArray1;
use pyo3::prelude::*;
use pyo3_stub_gen::{PyStubType, TypeInfo};

use crate::model::{DailyObservation, Error, Site};

#[derive(FromPyObject)]
pub struct PySite {
    pub latitude: f64,
    pub elevation: f64,
    pub growth_stage: String,
}

// Duck-typed: any object exposing these attributes is accepted.
impl PyStubType for PySite {
    fn type_output() -> TypeInfo {
        TypeInfo::any()
    }
}

impl PySite {
    pub fn into_site(self) -> Result<Site, Error> {
        Site::new(self.latitude, self.elevation, self.growth_stage)
    }
}

#[derive(FromPyObject)]
pub struct PyObservations<'py> {
    pub day_of_year: PyReadonlyArray1<'py, usize>,
    pub temp_max: PyReadonlyArray1<'py, f64>,
    pub temp_min: PyReadonlyArray1<'py, f64>,
    pub temp_mean: PyReadonlyArray1<'py, f64>,
    pub rh_max: PyReadonlyArray1<'py, f64>,
    pub rh_min: PyReadonlyArray1<'py, f64>,
    pub precipitation: PyReadonlyArray1<'py, f64>,
}

impl PyStubType for PyObservations<'_> {
    fn type_output() -> TypeInfo {
        TypeInfo::any()
    }
}

impl PyObservations<'_> {
    /// Days that do not fit in a `u16` are saturated and later rejected per
    /// day by validation.
    pub fn into_observations(self) -> Result<Vec<DailyObservation>, Error> {
        let day_of_year = self.day_of_year.as_array();
        let columns = [
            ("temp_max", self.temp_max.as_array()),
            ("temp_min", self.temp_min.as_array()),
            ("temp_mean", self.temp_mean.as_array()),
            ("rh_max", self.rh_max.as_array()),
            ("rh_min", self.rh_min.as_array()),
            ("precipitation", self.precipitation.as_array()),
        ];
        for (name, column) in &columns {
            if column.len() != day_of_year.len() {
                return Err(Error::LengthMismatch(
                    *name,
                    "day_of_year",
                    column.len(),
                    day_of_year.len(),
                ));
            }
        }
        let [temp_max, temp_min, temp_mean, rh_max, rh_min, precipitation] =
            columns.map(|(_, column)| column);

        Ok((0..day_of_year.len())
            .map(|t| DailyObservation {
                day_of_year: u16::try_from(day_of_year[t]).unwrap_or(u16::MAX),
                temp_max: temp_max[t],
                temp_min: temp_min[t],
                temp_mean: temp_mean[t],
                rh_max: rh_max[t],
                rh_min: rh_min[t],
                precipitation: precipitation[t],
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inputs_are_typed_as_any_in_stubs() {
        assert_eq!(PySite::type_input().name, TypeInfo::any().name);
        assert_eq!(PyObservations::type_input().name, TypeInfo::any().name);
    }
}
