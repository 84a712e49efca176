use serde::{Deserialize, Serialize};

/// Ordered list of levels for one career path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Curriculum {
    pub levels: Vec<CurriculumLevel>,
}

impl Curriculum {
    pub fn level_count(&self) -> u32 {
        u32::try_from(self.levels.len()).unwrap_or(u32::MAX)
    }

    /// Levels are numbered from 1.
    pub fn level(&self, level: u32) -> Option<&CurriculumLevel> {
        let index = usize::try_from(level).ok()?.checked_sub(1)?;
        self.levels.get(index)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurriculumLevel {
    pub title: String,
    pub duration: String,
    #[serde(default)]
    pub courses: Vec<ResourceLink>,
    #[serde(default)]
    pub projects: Vec<String>,
    #[serde(default)]
    pub internships: Vec<ResourceLink>,
    #[serde(default)]
    pub jobs: Vec<ResourceLink>,
    #[serde(default)]
    pub higher_studies: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceLink {
    pub name: String,
    pub url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn level(title: &str) -> CurriculumLevel {
        CurriculumLevel {
            title: title.to_string(),
            duration: "4 weeks".to_string(),
            courses: Vec::new(),
            projects: Vec::new(),
            internships: Vec::new(),
            jobs: Vec::new(),
            higher_studies: Vec::new(),
        }
    }

    #[test]
    fn levels_are_one_indexed() {
        let curriculum = Curriculum {
            levels: vec![level("Basics"), level("Depth")],
        };

        assert!(curriculum.level(0).is_none());
        assert_eq!(curriculum.level(1).map(|l| l.title.as_str()), Some("Basics"));
        assert_eq!(curriculum.level(2).map(|l| l.title.as_str()), Some("Depth"));
        assert!(curriculum.level(3).is_none());
        assert_eq!(curriculum.level_count(), 2);
    }

    #[test]
    fn optional_sections_default_when_absent() {
        let parsed: CurriculumLevel = serde_json::from_str(
            r#"{ "title": "Foundations", "duration": "6 weeks" }"#,
        )
        .expect("level parses");

        assert!(parsed.courses.is_empty());
        assert!(parsed.higher_studies.is_empty());
    }
}
