//! Release check
//!
//! Evaluates a GitHub "latest release" payload against the running version
//! and tracks when the next check is due. Fetching the payload is left to
//! the caller.

mod version;

pub use version::{AppVersion, MAX_VERSION_COMPONENTS};

use core::fmt::{self, Write};
use core::marker::PhantomData;

use embassy_time::{Duration, Instant};
use heapless::String;
use serde::de::{SeqAccess, Visitor};
use serde::{Deserialize, Deserializer};

/// Asset name suffixes accepted as a download
pub const DOWNLOAD_SUFFIXES: [&str; 3] = [".dmg", ".zip", ".pkg"];

/// Accept header the releases API expects
pub const RELEASES_ACCEPT: &str = "application/vnd.github.v3+json";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReleaseError {
    /// Payload is not a release object
    Deserialization,
    /// `tag_name` missing
    MissingTag,
    /// Release has no assets
    NoAssets,
    /// No asset with an installable suffix
    NoSuitableDownload,
    /// Tag is not a version
    InvalidVersion,
    /// URL does not fit the buffer
    BufferTooSmall,
}

impl fmt::Display for ReleaseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReleaseError::Deserialization => write!(f, "Invalid JSON response"),
            ReleaseError::MissingTag => write!(f, "Missing tag name"),
            ReleaseError::NoAssets => write!(f, "No assets available"),
            ReleaseError::NoSuitableDownload => write!(f, "No suitable download found"),
            ReleaseError::InvalidVersion => write!(f, "Invalid version format"),
            ReleaseError::BufferTooSmall => write!(f, "Buffer too small"),
        }
    }
}

#[derive(Deserialize)]
struct AssetPayload<'a> {
    #[serde(default, borrow)]
    name: Option<&'a str>,
    #[serde(default, borrow)]
    browser_download_url: Option<&'a str>,
}

/// What the release needs from its asset list, collected in one pass
///
/// The list is walked element by element, so its length is not bounded by
/// any buffer.
#[derive(Default)]
struct AssetSummary<'a> {
    count: usize,
    download_url: Option<&'a str>,
}

impl<'de: 'a, 'a> Deserialize<'de> for AssetSummary<'a> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_seq(AssetSummaryVisitor(PhantomData))
    }
}

struct AssetSummaryVisitor<'a>(PhantomData<&'a ()>);

impl<'de: 'a, 'a> Visitor<'de> for AssetSummaryVisitor<'a> {
    type Value = AssetSummary<'a>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an array of release assets")
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
        let mut summary = AssetSummary::default();
        while let Some(asset) = seq.next_element::<AssetPayload<'a>>()? {
            summary.count += 1;
            if summary.download_url.is_none() {
                summary.download_url = match (asset.name, asset.browser_download_url) {
                    (Some(name), Some(url)) if is_downloadable(name) => Some(url),
                    _ => None,
                };
            }
        }
        Ok(summary)
    }
}

#[derive(Deserialize)]
struct ReleasePayload<'a> {
    #[serde(default, borrow)]
    tag_name: Option<&'a str>,
    #[serde(default, borrow)]
    assets: AssetSummary<'a>,
}

/// Latest published release, borrowing from the payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Release<'a> {
    /// Raw tag, e.g. `v1.3.0`
    pub tag: &'a str,
    pub version: AppVersion,
    pub download_url: &'a str,
}

/// Outcome of comparing a release with the running version
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateStatus<'a> {
    UpToDate,
    Available(Release<'a>),
}

fn is_downloadable(name: &str) -> bool {
    DOWNLOAD_SUFFIXES.iter().any(|suffix| name.ends_with(suffix))
}

/// Parse a latest-release payload and pick its download.
pub fn parse_latest_release(payload: &[u8]) -> Result<Release<'_>, ReleaseError> {
    let (raw, _) = serde_json_core::from_slice::<ReleasePayload<'_>>(payload).map_err(|_e| {
        #[cfg(feature = "log")]
        log::warn!("release: rejected payload: {:?}", _e);

        ReleaseError::Deserialization
    })?;

    let tag = raw.tag_name.ok_or(ReleaseError::MissingTag)?;
    if raw.assets.count == 0 {
        return Err(ReleaseError::NoAssets);
    }
    let download_url = raw.assets.download_url.ok_or(ReleaseError::NoSuitableDownload)?;

    let version = AppVersion::parse(tag).ok_or(ReleaseError::InvalidVersion)?;

    Ok(Release {
        tag,
        version,
        download_url,
    })
}

/// Compare the latest release with `current`.
pub fn check_release<'a>(current: &AppVersion, payload: &'a [u8]) -> Result<UpdateStatus<'a>, ReleaseError> {
    let release = parse_latest_release(payload)?;
    if release.version > *current {
        #[cfg(feature = "log")]
        log::info!("release: {} available (running {})", release.version, current);

        Ok(UpdateStatus::Available(release))
    } else {
        Ok(UpdateStatus::UpToDate)
    }
}

/// API URL of the latest release of `owner/repo`
pub fn latest_release_url<const CAP: usize>(owner: &str, repo: &str) -> Result<String<CAP>, ReleaseError> {
    let mut url = String::new();
    write!(url, "https://api.github.com/repos/{}/{}/releases/latest", owner, repo)
        .map_err(|_| ReleaseError::BufferTooSmall)?;
    Ok(url)
}

const SECONDS_PER_DAY: u64 = 86_400;

/// How often releases are checked
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CheckFrequency {
    Daily,
    #[default]
    Weekly,
    Monthly,
}

impl CheckFrequency {
    pub const fn interval(self) -> Duration {
        match self {
            Self::Daily => Duration::from_secs(SECONDS_PER_DAY),
            Self::Weekly => Duration::from_secs(7 * SECONDS_PER_DAY),
            Self::Monthly => Duration::from_secs(30 * SECONDS_PER_DAY),
        }
    }

    /// Map a stored interval in seconds back to a frequency
    pub fn from_secs(secs: u64) -> Option<Self> {
        [Self::Daily, Self::Weekly, Self::Monthly]
            .into_iter()
            .find(|frequency| frequency.interval().as_secs() == secs)
    }
}

/// Bookkeeping for automatic release checks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UpdateSchedule {
    pub frequency: CheckFrequency,
    last_check: Option<Instant>,
}

impl UpdateSchedule {
    pub const fn new(frequency: CheckFrequency) -> Self {
        Self {
            frequency,
            last_check: None,
        }
    }

    pub fn last_check(&self) -> Option<Instant> {
        self.last_check
    }

    /// A check is due when none was recorded or more than one interval passed
    pub fn is_due(&self, now: Instant) -> bool {
        match self.last_check {
            None => true,
            Some(last) => now.saturating_duration_since(last) > self.frequency.interval(),
        }
    }

    pub fn record_check(&mut self, now: Instant) {
        self.last_check = Some(now);
    }
}
