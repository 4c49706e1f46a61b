// Domain layer: records, batch results and the ports the ETL engine drives.

pub mod model;
pub mod ports;
