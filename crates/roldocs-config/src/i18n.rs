//! Locale settings and built-in interface strings.

use serde::Serialize;

/// Validated locale setup. The default locale is always one of `locales`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct I18nConfig {
    default_locale: String,
    locales: Vec<String>,
}

impl I18nConfig {
    pub(crate) fn new(default_locale: String, locales: Vec<String>) -> Self {
        Self {
            default_locale,
            locales,
        }
    }

    pub fn default_locale(&self) -> &str {
        &self.default_locale
    }

    /// Locales in declaration order.
    pub fn locales(&self) -> &[String] {
        &self.locales
    }

    pub fn is_default(&self, locale: &str) -> bool {
        self.default_locale == locale
    }
}

/// Writing direction of a locale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TextDirection {
    Ltr,
    Rtl,
}

impl TextDirection {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ltr => "ltr",
            Self::Rtl => "rtl",
        }
    }
}

/// Text direction from the language part of a locale code.
pub fn text_direction(locale: &str) -> TextDirection {
    let lang = locale.split(['-', '_']).next().unwrap_or(locale);
    match lang.to_ascii_lowercase().as_str() {
        "ar" | "he" | "fa" | "ur" => TextDirection::Rtl,
        _ => TextDirection::Ltr,
    }
}

/// Interface strings rendered by the page templates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct UiStrings {
    pub on_this_page: &'static str,
    pub not_found_title: &'static str,
    pub not_found_message: &'static str,
    pub back_home: &'static str,
    pub toggle_theme: &'static str,
    pub copy: &'static str,
}

const EN: UiStrings = UiStrings {
    on_this_page: "On this page",
    not_found_title: "Page Not Found",
    not_found_message: "We could not find what you were looking for.",
    back_home: "Back to home",
    toggle_theme: "Toggle dark mode",
    copy: "Copy",
};

const ZH_HANS: UiStrings = UiStrings {
    on_this_page: "本页总览",
    not_found_title: "找不到页面",
    not_found_message: "我们找不到您要找的页面。",
    back_home: "返回首页",
    toggle_theme: "切换浅色/暗黑模式",
    copy: "复制",
};

const ZH_HANT: UiStrings = UiStrings {
    on_this_page: "本頁導覽",
    not_found_title: "找不到頁面",
    not_found_message: "我們找不到您要找的頁面。",
    back_home: "返回首頁",
    toggle_theme: "切換淺色/暗黑模式",
    copy: "複製",
};

const JA: UiStrings = UiStrings {
    on_this_page: "このページの見出し",
    not_found_title: "ページが見つかりません",
    not_found_message: "お探しのページが見つかりませんでした。",
    back_home: "ホームに戻る",
    toggle_theme: "ダークモードを切り替える",
    copy: "コピー",
};

/// Interface strings for a locale, English when the locale is unknown.
pub fn ui_strings(locale: &str) -> &'static UiStrings {
    match locale.to_ascii_lowercase().as_str() {
        "zh-hans" | "zh-cn" | "zh" => &ZH_HANS,
        "zh-hant" | "zh-tw" | "zh-hk" => &ZH_HANT,
        "ja" | "ja-jp" => &JA,
        _ => &EN,
    }
}
