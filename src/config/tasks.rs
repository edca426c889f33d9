// src/config/tasks.rs
//! Static report list: three monthly statistics tables, two from TPEx and one
//! from TWSE. Display names double as the filename stem, so keep them unique.

/// How to find an element on the page.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Locator {
    Css(&'static str),
    Id(&'static str),
}

impl std::fmt::Display for Locator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Locator::Css(sel) => write!(f, "css:{sel}"),
            Locator::Id(id) => write!(f, "id:{id}"),
        }
    }
}

/// A click that has to happen before the export button is meaningful
/// (e.g. switching the page to its monthly view).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PreAction {
    pub locator: Locator,
    pub label: &'static str,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReportTask {
    pub name: &'static str,
    pub url: &'static str,
    pub pre_actions: &'static [PreAction],
    pub trigger: Locator,
}

const TPEX_CSV_BUTTON: Locator = Locator::Css(r#"button.response[data-format="csv"]"#);

pub const TASKS: &[ReportTask] = &[
    // TPEx: monthly OTC trading statistics
    ReportTask {
        name: "月上櫃證券成交統計表",
        url: "https://www.tpex.org.tw/zh-tw/mainboard/trading/info/statistics/month.html",
        pre_actions: &[],
        trigger: TPEX_CSV_BUTTON,
    },
    // TWSE: monthly institutional investors summary; page opens on the daily view
    ReportTask {
        name: "月三大法人買賣金額統計表",
        url: "https://www.twse.com.tw/zh/trading/foreign/bfi82u.html",
        pre_actions: &[
            PreAction { locator: Locator::Id("label2"), label: "切換月報表" },
            PreAction { locator: Locator::Css("div.submit > button.search"), label: "點擊查詢" },
        ],
        trigger: Locator::Css("button.csv"),
    },
    // TPEx: monthly institutional investors summary
    ReportTask {
        name: "月上櫃三大法人買賣金額統計表",
        url: "https://www.tpex.org.tw/zh-tw/mainboard/trading/major-institutional/summary/month.html",
        pre_actions: &[],
        trigger: TPEX_CSV_BUTTON,
    },
];
