// src/config/consts.rs

// Shared download directory (network share on the reporting box)
#[cfg(windows)]
pub const DOWNLOAD_ROOT: &str = r"P:\經紀業務部\業務管理科\業務數據資料庫\AUTO\DownloadFile\外部\月工作表";
#[cfg(not(windows))]
pub const DOWNLOAD_ROOT: &str = "out/monthly";

// Browser
pub const WEBDRIVER_URL: &str = "http://localhost:9515";
pub const HEADLESS: bool = true;

// Waits
pub const ELEMENT_TIMEOUT_SECS: u64 = 20;
pub const ARRIVAL_TIMEOUT_SECS: u64 = 60;
pub const POLL_INTERVAL_MS: u64 = 300;

// File naming
pub const RAW_SUFFIX: &str = ".csv";
pub const IN_PROGRESS_SUFFIX: &str = ".crdownload";
pub const TEMP_SUFFIX: &str = ".tmp";
pub const PARTIAL_SUFFIX: &str = ".part";
pub const TRANSIENT_SUFFIXES: &[&str] = &[TEMP_SUFFIX, IN_PROGRESS_SUFFIX, PARTIAL_SUFFIX, RAW_SUFFIX];
pub const FINAL_EXT: &str = "xlsx";
pub const SHEET_NAME: &str = "Data";

// Local log
pub const LOG_FILE: &str = ".store/debug.log";
