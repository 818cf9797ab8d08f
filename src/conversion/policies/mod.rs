/// Conversion rules with no I/O: vocabulary tables, timestamps, versions, CVSS
pub mod cvss;
pub mod dialect;
pub mod timestamp;
pub mod versioning;
