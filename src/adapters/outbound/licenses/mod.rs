/// License classification adapters
mod spdx_catalog;

pub use spdx_catalog::SpdxLicenseCatalog;
