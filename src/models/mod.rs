pub mod certificate;
pub mod profile;
pub mod report;

pub use certificate::{CertificateCategory, CertificateDescriptor, FULL_CERTIFICATE_NAME};
pub use profile::StudentProfile;
pub use report::{ArchiveSummary, DownloadResult, ItemReport};
