use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Competition {
    pub title: String,
    pub link: String,
    pub org: String,
    pub category: Category,
    pub status: Status,
    pub deadline: Option<NaiveDate>,
    pub prize: String,
}

impl Display for Competition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:<45.45}  {:<8.8}  {:<10}  {:.40}",
            self.title,
            self.status.label(),
            self.deadline
                .map(|d| d.to_string())
                .unwrap_or_else(|| "—".to_string()),
            self.link
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "Vizualni identitet")]
    VisualIdentity,
    #[serde(rename = "Ilustracija")]
    Illustration,
    #[serde(rename = "Dizajn knjige")]
    BookDesign,
    #[serde(rename = "UX/UI dizajn")]
    UxUi,
    #[serde(rename = "Modni dizajn")]
    FashionDesign,
    #[serde(rename = "Industrijski dizajn")]
    IndustrialDesign,
    #[serde(rename = "Arhitektura")]
    Architecture,
    #[serde(rename = "Tipografija")]
    Typography,
    #[serde(rename = "Dizajn ambalaže")]
    PackagingDesign,
    #[serde(rename = "Komunikacijski dizajn")]
    CommunicationDesign,
    #[serde(rename = "Grafički dizajn")]
    GraphicDesign,
}

impl Category {
    pub fn label(&self) -> &'static str {
        match self {
            Category::VisualIdentity => "Vizualni identitet",
            Category::Illustration => "Ilustracija",
            Category::BookDesign => "Dizajn knjige",
            Category::UxUi => "UX/UI dizajn",
            Category::FashionDesign => "Modni dizajn",
            Category::IndustrialDesign => "Industrijski dizajn",
            Category::Architecture => "Arhitektura",
            Category::Typography => "Tipografija",
            Category::PackagingDesign => "Dizajn ambalaže",
            Category::CommunicationDesign => "Komunikacijski dizajn",
            Category::GraphicDesign => "Grafički dizajn",
        }
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Status {
    #[serde(rename = "Aktivno")]
    Active,
    #[serde(rename = "Završeno")]
    Closed,
    // Never stored; adapters drop News entries at extraction.
    #[serde(rename = "Novost")]
    News,
}

impl Status {
    pub fn label(&self) -> &'static str {
        match self {
            Status::Active => "Aktivno",
            Status::Closed => "Završeno",
            Status::News => "Novost",
        }
    }
}

impl Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}
