mod download;
mod resource;
mod site;
mod stats;

pub use download::{DownloadManager, DownloadOutcome};
pub use resource::{Article, TableOfContents, WebResource};
pub use site::{NewsSite, PassKind};
