use std::{collections::HashMap, fs, path::Path};

use shared::{
    domain::{Lesson, LessonId},
    error::{CartError, CatalogError},
};
use thiserror::Error;

/// Capacity every seed lesson starts with.
pub const SEED_CAPACITY: u32 = 5;

#[derive(Debug, Error)]
pub enum CatalogLoadError {
    #[error("failed to read catalog file '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("failed to parse catalog file '{path}': {source}")]
    Parse {
        path: String,
        source: serde_json::Error,
    },
    #[error(transparent)]
    Invalid(#[from] CatalogError),
}

/// The lesson list plus the capacity each lesson was loaded with.
#[derive(Debug, Clone)]
pub struct Catalog {
    lessons: Vec<Lesson>,
    capacities: HashMap<LessonId, u32>,
}

impl Catalog {
    pub fn new(lessons: Vec<Lesson>) -> Result<Self, CatalogError> {
        let mut capacities = HashMap::with_capacity(lessons.len());
        for lesson in &lessons {
            if lesson.id.0 == 0 {
                return Err(CatalogError::ZeroId);
            }
            if !lesson.price.is_finite() || lesson.price < 0.0 {
                return Err(CatalogError::InvalidPrice {
                    lesson_id: lesson.id,
                    price: lesson.price,
                });
            }
            if capacities.insert(lesson.id, lesson.spaces).is_some() {
                return Err(CatalogError::DuplicateId(lesson.id));
            }
        }
        Ok(Self {
            lessons,
            capacities,
        })
    }

    pub fn seeded() -> Self {
        let lessons = seed_lessons();
        let capacities = lessons.iter().map(|l| (l.id, l.spaces)).collect();
        Self {
            lessons,
            capacities,
        }
    }

    /// Loads lessons from a JSON array file, or the seed list when no path is given.
    pub fn load(path: Option<&Path>) -> Result<Self, CatalogLoadError> {
        let Some(path) = path else {
            return Ok(Self::seeded());
        };

        let raw = fs::read_to_string(path).map_err(|source| CatalogLoadError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let lessons: Vec<Lesson> =
            serde_json::from_str(&raw).map_err(|source| CatalogLoadError::Parse {
                path: path.display().to_string(),
                source,
            })?;
        let catalog = Self::new(lessons)?;
        tracing::info!(
            path = %path.display(),
            lessons = catalog.lessons.len(),
            "loaded catalog file"
        );
        Ok(catalog)
    }

    pub fn lessons(&self) -> &[Lesson] {
        &self.lessons
    }

    pub fn len(&self) -> usize {
        self.lessons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lessons.is_empty()
    }

    pub fn get(&self, id: LessonId) -> Option<&Lesson> {
        self.lessons.iter().find(|l| l.id == id)
    }

    /// Spaces the lesson had when the catalog was loaded.
    pub fn capacity(&self, id: LessonId) -> Option<u32> {
        self.capacities.get(&id).copied()
    }

    pub(crate) fn take_space(&mut self, id: LessonId) -> Result<(), CartError> {
        let lesson = self
            .lessons
            .iter_mut()
            .find(|l| l.id == id)
            .ok_or(CartError::UnknownLesson { lesson_id: id })?;
        if lesson.spaces == 0 {
            return Err(CartError::SoldOut { lesson_id: id });
        }
        lesson.spaces -= 1;
        Ok(())
    }

    /// Returns false when the lesson is not in the catalog.
    pub(crate) fn restore_spaces(&mut self, id: LessonId, units: u32) -> bool {
        match self.lessons.iter_mut().find(|l| l.id == id) {
            Some(lesson) => {
                lesson.spaces += units;
                true
            }
            None => false,
        }
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::seeded()
    }
}

fn seed_lesson(
    id: u32,
    subject: &str,
    location: &str,
    price: f64,
    icon: &str,
    image: &str,
) -> Lesson {
    Lesson {
        id: LessonId(id),
        subject: subject.to_string(),
        location: location.to_string(),
        price,
        spaces: SEED_CAPACITY,
        icon: icon.to_string(),
        image: image.to_string(),
    }
}

pub fn seed_lessons() -> Vec<Lesson> {
    vec![
        seed_lesson(
            1,
            "Mathematics",
            "Hendon",
            100.0,
            "fa-solid fa-calculator",
            "https://img.icons8.com/color/240/calculator--v1.png",
        ),
        seed_lesson(
            2,
            "English",
            "Colindale",
            80.0,
            "fa-solid fa-book-open",
            "https://img.icons8.com/color/240/book-reading.png",
        ),
        seed_lesson(
            3,
            "Biology",
            "Golders Green",
            90.0,
            "fa-solid fa-seedling",
            "biology.png",
        ),
        seed_lesson(
            4,
            "Chemistry",
            "Brent Cross",
            70.0,
            "fa-solid fa-flask",
            "https://img.icons8.com/color/240/test-tube.png",
        ),
        seed_lesson(
            5,
            "History",
            "Hendon",
            50.0,
            "fa-solid fa-landmark",
            "https://img.icons8.com/color/240/scroll.png",
        ),
        seed_lesson(
            6,
            "Physics",
            "Colindale",
            95.0,
            "fa-solid fa-atom",
            "https://img.icons8.com/color/240/physics.png",
        ),
        seed_lesson(
            7,
            "Art",
            "Brent Cross",
            60.0,
            "fa-solid fa-palette",
            "https://img.icons8.com/color/240/art-prices.png",
        ),
        seed_lesson(
            8,
            "Geography",
            "Golders Green",
            85.0,
            "fa-solid fa-earth-europe",
            "https://img.icons8.com/color/240/globe--v1.png",
        ),
        seed_lesson(
            9,
            "Computer Science",
            "Hendon",
            120.0,
            "fa-solid fa-code",
            "https://img.icons8.com/color/240/source-code.png",
        ),
        seed_lesson(
            10,
            "Economics",
            "Colindale",
            110.0,
            "fa-solid fa-chart-line",
            "https://img.icons8.com/color/240/economic-improvement.png",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lesson(id: u32, price: f64) -> Lesson {
        Lesson {
            id: LessonId(id),
            subject: format!("Subject {id}"),
            location: "Hendon".to_string(),
            price,
            spaces: 3,
            icon: String::new(),
            image: String::new(),
        }
    }

    #[test]
    fn seed_has_ten_lessons_with_five_spaces() {
        let catalog = Catalog::seeded();
        assert_eq!(catalog.len(), 10);
        for (idx, lesson) in catalog.lessons().iter().enumerate() {
            assert_eq!(lesson.id, LessonId(idx as u32 + 1));
            assert_eq!(lesson.spaces, SEED_CAPACITY);
            assert_eq!(catalog.capacity(lesson.id), Some(SEED_CAPACITY));
        }
    }

    #[test]
    fn rejects_duplicate_ids() {
        let err = Catalog::new(vec![lesson(1, 10.0), lesson(1, 20.0)]).expect_err("duplicate");
        assert_eq!(err, CatalogError::DuplicateId(LessonId(1)));
    }

    #[test]
    fn rejects_zero_id_and_negative_price() {
        assert_eq!(
            Catalog::new(vec![lesson(0, 10.0)]).expect_err("zero id"),
            CatalogError::ZeroId
        );
        assert!(matches!(
            Catalog::new(vec![lesson(2, -1.0)]).expect_err("negative price"),
            CatalogError::InvalidPrice { .. }
        ));
    }

    #[test]
    fn take_space_stops_at_zero() {
        let mut catalog = Catalog::new(vec![Lesson {
            spaces: 1,
            ..lesson(4, 10.0)
        }])
        .expect("catalog");
        catalog.take_space(LessonId(4)).expect("first space");
        assert_eq!(
            catalog.take_space(LessonId(4)),
            Err(CartError::SoldOut {
                lesson_id: LessonId(4)
            })
        );
        assert_eq!(catalog.get(LessonId(4)).map(|l| l.spaces), Some(0));
    }

    #[test]
    fn loads_lessons_from_json_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("catalog.json");
        let lessons = vec![lesson(7, 12.5), lesson(8, 30.0)];
        fs::write(&path, serde_json::to_string(&lessons).expect("json")).expect("write");

        let catalog = Catalog::load(Some(&path)).expect("load");
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.get(LessonId(7)).map(|l| l.price), Some(12.5));
        assert_eq!(catalog.capacity(LessonId(8)), Some(3));
    }

    #[test]
    fn missing_catalog_file_reports_path() {
        let err = Catalog::load(Some(Path::new("/definitely/not/here.json"))).expect_err("io");
        assert!(err.to_string().contains("/definitely/not/here.json"));
    }
}
