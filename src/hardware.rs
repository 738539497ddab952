//! Mac model detection via `system_profiler`.
//!
//! The hardware overview is buried a couple of levels deep:
//!
//! ```text
//! [{
//!   _items: [{
//!     _name: "hardware_overview",
//!     machine_model: "MacBookPro11,5",
//!     machine_name: "MacBook Pro",
//!     ...
//! ```

use crate::runner::{CommandRunner, Invocation};
use crate::utils::error::HardwareError;
use log::debug;
use serde::Deserialize;

/// One `SP*DataType` report from `system_profiler -xml`
#[derive(Debug, Deserialize)]
struct DataTypeReport {
    #[serde(rename = "_items", default)]
    items: Vec<HardwareOverview>,
}

#[derive(Debug, Deserialize)]
struct HardwareOverview {
    #[serde(default)]
    machine_model: Option<String>,
}

/// The `system_profiler` call that reports the hardware overview
pub fn hardware_query() -> Invocation {
    Invocation::new("system_profiler").args(["SPHardwareDataType", "-xml"])
}

/// Obtain the local Mac's model identifier (e.g. `MacBookPro11,5`)
pub fn detect_model(runner: &dyn CommandRunner) -> Result<String, HardwareError> {
    let output = runner.run(&hardware_query())?;
    let model = parse_hardware_report(&output)?;
    debug!("system_profiler reports machine model {}", model);
    Ok(model)
}

/// Extract the machine model from `system_profiler -xml` output
pub fn parse_hardware_report(xml: &[u8]) -> Result<String, HardwareError> {
    let reports: Vec<DataTypeReport> = plist::from_bytes(xml)?;

    reports
        .into_iter()
        .next()
        .and_then(|report| report.items.into_iter().next())
        .and_then(|overview| overview.machine_model)
        .filter(|model| !model.is_empty())
        .ok_or(HardwareError::MissingModel)
}
