pub mod archive_packager;
pub mod certificate_downloader;
pub mod certificate_enumerator;
pub mod directory_organizer;
pub mod profile_navigator;

pub use archive_packager::{ArchiveJob, ArchivePackager};
pub use certificate_downloader::CertificateDownloader;
pub use certificate_enumerator::CertificateEnumerator;
pub use directory_organizer::{DirectoryOrganizer, HarvestLayout};
pub use profile_navigator::ProfileNavigator;
