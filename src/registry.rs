use std::collections::BTreeMap;

use crate::{
    core::{BlockId, RouteKey},
    error::{ScrollworkError, ScrollworkResult},
};

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct ProjectCard {
    pub title: String,
    pub desc: String,
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct ContactLink {
    pub icon: String, // symbolic id, e.g. "envelope"
    pub href: String,
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub enum BlockContent {
    Heading(String),
    Paragraph(String),
    SkillList(Vec<String>),
    Project(ProjectCard),
    ContactLinks(Vec<ContactLink>),
}

/// One unit of view content. Blocks with `reveal` set stay hidden until
/// they cross the intersection threshold; the rest are visible on mount.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct ContentBlock {
    pub id: BlockId,
    pub content: BlockContent,
    pub reveal: bool,
}

impl ContentBlock {
    pub fn validate(&self) -> ScrollworkResult<()> {
        if self.id.0.trim().is_empty() {
            return Err(ScrollworkError::validation("block id must be non-empty"));
        }
        match &self.content {
            BlockContent::Heading(s) | BlockContent::Paragraph(s) => {
                if s.trim().is_empty() {
                    return Err(ScrollworkError::validation(format!(
                        "block '{}' has empty text",
                        self.id
                    )));
                }
            }
            BlockContent::SkillList(items) => {
                if items.iter().any(|s| s.trim().is_empty()) {
                    return Err(ScrollworkError::validation(format!(
                        "block '{}' has an empty skill entry",
                        self.id
                    )));
                }
            }
            BlockContent::Project(p) => {
                if p.title.trim().is_empty() || p.desc.trim().is_empty() {
                    return Err(ScrollworkError::validation(format!(
                        "block '{}' has an empty project field",
                        self.id
                    )));
                }
            }
            BlockContent::ContactLinks(links) => {
                if links
                    .iter()
                    .any(|l| l.icon.trim().is_empty() || l.href.trim().is_empty())
                {
                    return Err(ScrollworkError::validation(format!(
                        "block '{}' has an empty contact link field",
                        self.id
                    )));
                }
            }
        }
        Ok(())
    }
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct ViewSpec {
    pub key: RouteKey,
    pub title: String,
    /// Duration of the view's enter (and exit) animation, seconds.
    pub enter_duration_secs: f64,
    pub blocks: Vec<ContentBlock>,
}

impl ViewSpec {
    pub fn validate(&self) -> ScrollworkResult<()> {
        if self.key.as_str().is_empty() {
            return Err(ScrollworkError::validation("view key must be non-empty"));
        }
        if self.title.trim().is_empty() {
            return Err(ScrollworkError::validation(format!(
                "view '{}' has an empty title",
                self.key
            )));
        }
        if !self.enter_duration_secs.is_finite() || self.enter_duration_secs <= 0.0 {
            return Err(ScrollworkError::validation(format!(
                "view '{}' enter_duration_secs must be finite and > 0",
                self.key
            )));
        }
        let mut seen = std::collections::BTreeSet::new();
        for block in &self.blocks {
            block.validate()?;
            if !seen.insert(&block.id) {
                return Err(ScrollworkError::validation(format!(
                    "view '{}' has duplicate block id '{}'",
                    self.key, block.id
                )));
            }
        }
        Ok(())
    }
}

pub type ViewProducer = fn() -> ViewSpec;

/// Static, ordered path → view mapping. Built once at startup, read-only
/// afterwards; the coordinator resolves every navigation through it.
#[derive(Clone, Debug, Default)]
pub struct ViewRegistry {
    views: BTreeMap<String, ViewProducer>,
}

impl ViewRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(
        &mut self,
        path: impl Into<String>,
        producer: ViewProducer,
    ) -> ScrollworkResult<()> {
        let path = path.into();
        if path.is_empty() {
            return Err(ScrollworkError::validation("route path must be non-empty"));
        }
        if self.views.contains_key(&path) {
            return Err(ScrollworkError::validation(format!(
                "duplicate route path '{path}'"
            )));
        }
        self.views.insert(path, producer);
        Ok(())
    }

    /// Produce and validate the view for `key`. A miss is a configuration
    /// error at this boundary, never a coordinator state.
    pub fn resolve(&self, key: &RouteKey) -> ScrollworkResult<ViewSpec> {
        let producer = self.views.get(key.as_str()).ok_or_else(|| {
            ScrollworkError::routing(format!("no view registered for '{key}'"))
        })?;
        let spec = producer();
        spec.validate()?;
        Ok(spec)
    }

    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.views.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.views.len()
    }

    pub fn is_empty(&self) -> bool {
        self.views.is_empty()
    }

    /// The built-in portfolio site: `/`, `/about`, `/projects`, `/contact`.
    pub fn site() -> Self {
        let entries: [(&str, ViewProducer); 4] = [
            ("/", home_view),
            ("/about", about_view),
            ("/projects", projects_view),
            ("/contact", contact_view),
        ];
        let views = entries
            .into_iter()
            .map(|(path, producer)| (path.to_string(), producer))
            .collect();
        Self { views }
    }
}

fn home_view() -> ViewSpec {
    ViewSpec {
        key: RouteKey::new("/"),
        title: "Home".to_string(),
        enter_duration_secs: 0.5,
        blocks: vec![
            ContentBlock {
                id: BlockId::new("home/intro"),
                content: BlockContent::Heading("Hi, I'm Alex".to_string()),
                reveal: false,
            },
            ContentBlock {
                id: BlockId::new("home/lead"),
                content: BlockContent::Paragraph(
                    "A young professional passionate about technology, data, and \
                     financial analysis, building digital solutions that are \
                     effective and efficient."
                        .to_string(),
                ),
                reveal: false,
            },
        ],
    }
}

fn about_view() -> ViewSpec {
    ViewSpec {
        key: RouteKey::new("/about"),
        title: "About".to_string(),
        enter_duration_secs: 0.4,
        blocks: vec![
            ContentBlock {
                id: BlockId::new("about/bio"),
                content: BlockContent::Paragraph(
                    "Two years of experience in production administration, currently \
                     studying accounting. Interested in data, financial analysis, and \
                     technology for business efficiency."
                        .to_string(),
                ),
                reveal: true,
            },
            ContentBlock {
                id: BlockId::new("about/skills"),
                content: BlockContent::SkillList(vec![
                    "React & JavaScript".to_string(),
                    "HTML & CSS".to_string(),
                    "Data Analysis (Excel, SQL)".to_string(),
                    "Financial Reporting".to_string(),
                ]),
                reveal: true,
            },
        ],
    }
}

fn projects_view() -> ViewSpec {
    ViewSpec {
        key: RouteKey::new("/projects"),
        title: "Projects".to_string(),
        enter_duration_secs: 0.4,
        blocks: vec![
            ContentBlock {
                id: BlockId::new("projects/heading"),
                content: BlockContent::Heading("Projects".to_string()),
                reveal: false,
            },
            ContentBlock {
                id: BlockId::new("projects/0"),
                content: BlockContent::Project(ProjectCard {
                    title: "Bank Financial Analysis".to_string(),
                    desc: "Financial statement analysis using ratios and data \
                           visualization for business insight."
                        .to_string(),
                }),
                reveal: true,
            },
            ContentBlock {
                id: BlockId::new("projects/1"),
                content: BlockContent::Project(ProjectCard {
                    title: "Production Data Dashboard".to_string(),
                    desc: "Interactive dashboard monitoring palm oil production \
                           performance."
                        .to_string(),
                }),
                reveal: true,
            },
        ],
    }
}

fn contact_view() -> ViewSpec {
    ViewSpec {
        key: RouteKey::new("/contact"),
        title: "Contact".to_string(),
        enter_duration_secs: 0.4,
        blocks: vec![ContentBlock {
            id: BlockId::new("contact/links"),
            content: BlockContent::ContactLinks(vec![
                ContactLink {
                    icon: "envelope".to_string(),
                    href: "mailto:hello@example.com".to_string(),
                },
                ContactLink {
                    icon: "linkedin".to_string(),
                    href: "https://linkedin.com/in/username".to_string(),
                },
                ContactLink {
                    icon: "instagram".to_string(),
                    href: "https://instagram.com/username".to_string(),
                },
            ]),
            reveal: true,
        }],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn site_registry_resolves_all_known_paths() {
        let reg = ViewRegistry::site();
        for path in ["/", "/about", "/projects", "/contact"] {
            let spec = reg.resolve(&RouteKey::new(path)).unwrap();
            assert_eq!(spec.key.as_str(), path);
            assert!(spec.validate().is_ok());
        }
    }

    #[test]
    fn unknown_path_is_a_routing_error() {
        let reg = ViewRegistry::site();
        let err = reg.resolve(&RouteKey::new("/missing")).unwrap_err();
        assert!(err.to_string().contains("routing error:"));
    }

    #[test]
    fn home_enters_slower_than_other_views() {
        let reg = ViewRegistry::site();
        let home = reg.resolve(&RouteKey::new("/")).unwrap();
        let about = reg.resolve(&RouteKey::new("/about")).unwrap();
        assert_eq!(home.enter_duration_secs, 0.5);
        assert_eq!(about.enter_duration_secs, 0.4);
    }

    #[test]
    fn projects_view_has_two_reveal_blocks() {
        let reg = ViewRegistry::site();
        let spec = reg.resolve(&RouteKey::new("/projects")).unwrap();
        assert_eq!(spec.blocks.iter().filter(|b| b.reveal).count(), 2);
    }

    #[test]
    fn duplicate_registration_is_rejected() {
        let mut reg = ViewRegistry::site();
        assert!(reg.register("/", home_view).is_err());
    }

    #[test]
    fn validate_rejects_empty_project_fields() {
        let block = ContentBlock {
            id: BlockId::new("x"),
            content: BlockContent::Project(ProjectCard {
                title: "ok".to_string(),
                desc: "  ".to_string(),
            }),
            reveal: true,
        };
        assert!(block.validate().is_err());
    }

    #[test]
    fn validate_rejects_duplicate_block_ids() {
        let mut spec = home_view();
        spec.blocks[1].id = spec.blocks[0].id.clone();
        assert!(spec.validate().is_err());
    }
}
