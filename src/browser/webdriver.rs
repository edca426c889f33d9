// src/browser/webdriver.rs
// Headless Chrome over a running chromedriver.

use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::json;
use thirtyfour::extensions::cdp::ChromeDevTools;
use thirtyfour::prelude::*;
use thirtyfour::{ChromeCapabilities, ChromiumLikeCapabilities};
use tracing::{debug, warn};

use super::{BrowserSession, SessionLauncher};
use crate::config::options::BrowserOptions;
use crate::config::tasks::Locator;
use crate::error::BrowserError;

const CLICK_POLL: Duration = Duration::from_millis(250);

fn session_err(e: WebDriverError) -> BrowserError {
    BrowserError::Session(e.to_string())
}

pub struct WebDriverLauncher {
    opts: BrowserOptions,
}

impl WebDriverLauncher {
    pub fn new(opts: BrowserOptions) -> Self {
        Self { opts }
    }

    fn capabilities(&self, download_dir: &str) -> Result<ChromeCapabilities, BrowserError> {
        let mut caps = DesiredCapabilities::chrome();
        if self.opts.headless {
            caps.add_arg("--headless=new").map_err(session_err)?;
        }
        caps.add_arg("--disable-gpu").map_err(session_err)?;
        caps.add_arg("--no-sandbox").map_err(session_err)?;
        caps.add_experimental_option(
            "prefs",
            json!({
                "download.default_directory": download_dir,
                "download.prompt_for_download": false,
                "profile.default_content_settings.popups": 0,
            }),
        )
        .map_err(session_err)?;
        Ok(caps)
    }
}

#[async_trait]
impl SessionLauncher for WebDriverLauncher {
    async fn open(&self, download_dir: &Path) -> Result<Box<dyn BrowserSession>, BrowserError> {
        // Chrome ignores relative download paths.
        let dir = std::path::absolute(download_dir)
            .map_err(|e| BrowserError::Session(format!("{}: {e}", download_dir.display())))?;
        let dir = dir.to_string_lossy().into_owned();

        let caps = self.capabilities(&dir)?;
        let driver = WebDriver::new(self.opts.webdriver_url.as_str(), caps)
            .await
            .map_err(session_err)?;
        debug!("Browser: session opened, downloads → {dir}");

        // Headless Chrome doesn't always honour the prefs; say it again over CDP.
        let dev_tools = ChromeDevTools::new(driver.handle.clone());
        if let Err(e) = dev_tools
            .execute_cdp_with_params(
                "Page.setDownloadBehavior",
                json!({ "behavior": "allow", "downloadPath": dir }),
            )
            .await
        {
            warn!("Browser: Page.setDownloadBehavior failed: {e}");
        }

        Ok(Box::new(WebDriverSession { driver: Some(driver) }))
    }
}

pub struct WebDriverSession {
    driver: Option<WebDriver>,
}

impl WebDriverSession {
    fn driver(&self) -> Result<&WebDriver, BrowserError> {
        self.driver
            .as_ref()
            .ok_or_else(|| BrowserError::Session(s!("session already closed")))
    }
}

fn to_by(locator: &Locator) -> By {
    match locator {
        Locator::Css(sel) => By::Css(*sel),
        Locator::Id(id) => By::Id(*id),
    }
}

#[async_trait]
impl BrowserSession for WebDriverSession {
    async fn navigate(&mut self, url: &str) -> Result<(), BrowserError> {
        self.driver()?.goto(url).await.map_err(session_err)
    }

    async fn click_when_ready(&mut self, locator: &Locator, timeout: Duration) -> Result<(), BrowserError> {
        let driver = self.driver()?;
        let elem = driver
            .query(to_by(locator))
            .wait(timeout, CLICK_POLL)
            .and_clickable()
            .first()
            .await
            .map_err(|e| BrowserError::NotReady {
                locator: locator.to_string(),
                waited: timeout,
                detail: e.to_string(),
            })?;
        elem.click().await.map_err(session_err)
    }

    async fn teardown(&mut self) -> Result<(), BrowserError> {
        if let Some(driver) = self.driver.take() {
            driver.quit().await.map_err(session_err)?;
            debug!("Browser: session closed");
        }
        Ok(())
    }
}
