use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub u32);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

id_newtype!(LessonId);

/// A bookable class in the catalog. `spaces` is the only field that changes
/// after load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lesson {
    pub id: LessonId,
    pub subject: String,
    pub location: String,
    pub price: f64,
    pub spaces: u32,
    pub icon: String,
    pub image: String,
}

/// A cart reservation. Subject, location, price and image are copied from the
/// lesson when the line is created and never refreshed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    pub lesson_id: LessonId,
    pub subject: String,
    pub location: String,
    pub price: f64,
    pub image: String,
    pub quantity: u32,
}

impl CartLine {
    pub fn from_lesson(lesson: &Lesson) -> Self {
        Self {
            lesson_id: lesson.id,
            subject: lesson.subject.clone(),
            location: lesson.location.clone(),
            price: lesson.price,
            image: lesson.image.clone(),
            quantity: 1,
        }
    }

    pub fn line_total(&self) -> f64 {
        self.price * f64::from(self.quantity)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortField {
    #[default]
    Subject,
    Location,
    Price,
    Spaces,
}

impl SortField {
    pub const ALL: [SortField; 4] = [
        SortField::Subject,
        SortField::Location,
        SortField::Price,
        SortField::Spaces,
    ];

    pub fn label(self) -> &'static str {
        match self {
            SortField::Subject => "Subject",
            SortField::Location => "Location",
            SortField::Price => "Price",
            SortField::Spaces => "Spaces",
        }
    }
}

impl FromStr for SortField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "subject" => Ok(SortField::Subject),
            "location" => Ok(SortField::Location),
            "price" => Ok(SortField::Price),
            "spaces" => Ok(SortField::Spaces),
            other => Err(format!(
                "unknown sort field '{other}' (expected subject, location, price or spaces)"
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub fn label(self) -> &'static str {
        match self {
            SortOrder::Asc => "Ascending",
            SortOrder::Desc => "Descending",
        }
    }
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" | "ascending" => Ok(SortOrder::Asc),
            "desc" | "descending" => Ok(SortOrder::Desc),
            other => Err(format!("unknown sort order '{other}' (expected asc or desc)")),
        }
    }
}

/// Which page the display surface is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StoreView {
    #[default]
    Lessons,
    Cart,
}
