//! Landing page: hero banner and the feature list.

use serde::Serialize;

use crate::links::localize;

/// One card of the feature list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FeatureItem {
    pub title: &'static str,
    /// Image path relative to the static directory
    pub icon: &'static str,
    pub description: &'static str,
}

/// The features shown on the landing page, left to right.
pub const FEATURES: [FeatureItem; 3] = [
    FeatureItem {
        title: "割草战斗系统",
        icon: "img/undraw_docusaurus_mountain.svg",
        description: "类吸血鬼幸存者的爽快割草玩法，操控神话英雄释放神力，体验千军万马的战斗快感。",
    },
    FeatureItem {
        title: "SLG策略系统",
        icon: "img/undraw_docusaurus_tree.svg",
        description: "占领领地、建设城市、组建联盟。从奥林匹斯到人间，打造属于你的神话帝国。",
    },
    FeatureItem {
        title: "神话英雄收集",
        icon: "img/undraw_docusaurus_react.svg",
        description: "希腊诸神、北欧神话、东方传说等多文明英雄。独特技能体系与装备系统，打造最强阵容。",
    },
];

/// Hero banner content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hero {
    pub title: &'static str,
    pub subtitle: &'static str,
    pub cta_label: &'static str,
    /// Route the call-to-action points at
    pub cta_to: &'static str,
    /// `<title>` of the landing page
    pub page_title: &'static str,
    pub description: &'static str,
}

pub const HERO: Hero = Hero {
    title: "Realm of Legends",
    subtitle: "神话割草 × 策略占地",
    cta_label: "开始探索 ⚔️",
    cta_to: "/docs/intro",
    page_title: "Realm of Legends - 开发文档",
    description: "神话题材的割草类+SLG游戏开发文档",
};

/// Hero as handed to the template, with the call-to-action resolved.
#[derive(Debug, Clone, Serialize)]
pub struct HeroView {
    pub title: &'static str,
    pub subtitle: &'static str,
    pub cta_label: &'static str,
    pub cta_href: String,
}

/// Feature card as handed to the template, with the icon resolved.
#[derive(Debug, Clone, Serialize)]
pub struct FeatureCard {
    pub title: &'static str,
    pub icon_src: String,
    pub description: &'static str,
}

/// Everything the landing template needs.
#[derive(Debug, Clone, Serialize)]
pub struct LandingView {
    pub hero: HeroView,
    pub features: Vec<FeatureCard>,
}

impl LandingView {
    /// Resolve links against a locale's base URL. `cta_href` is the already
    /// localized call-to-action link.
    pub fn new(base_url: &str, cta_href: String) -> Self {
        Self {
            hero: HeroView {
                title: HERO.title,
                subtitle: HERO.subtitle,
                cta_label: HERO.cta_label,
                cta_href,
            },
            features: FEATURES
                .iter()
                .map(|f| FeatureCard {
                    title: f.title,
                    icon_src: localize(base_url, f.icon),
                    description: f.description,
                })
                .collect(),
        }
    }
}
