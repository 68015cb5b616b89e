pub mod astronomy;
pub mod crop;
mod data;
pub mod pet;
pub mod water;

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use crate::model::Error;

impl From<Error> for PyErr {
    fn from(err: Error) -> PyErr {
        PyValueError::new_err(err.to_string())
    }
}

/// Register a submodule in sys.modules so it can be imported.
pub fn register_submodule(
    py: Python<'_>,
    parent: &Bound<'_, PyModule>,
    child: &Bound<'_, PyModule>,
    parent_name: &str,
) -> PyResult<()> {
    parent.add_submodule(child)?;
    let child_name = child.name()?;
    let full_name = format!("{}.{}", parent_name, child_name);
    py.import("sys")?
        .getattr("modules")?
        .set_item(full_name, child)?;
    Ok(())
}
