use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::task::JoinHandle;
use walkdir::WalkDir;

use super::data::{CategoryFilter, Project};

/// Name of the descriptor file inside each project folder
pub const DESCRIPTOR_FILE: &str = "info.json";

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid project descriptor {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("no project could be loaded from {0}")]
    Empty(PathBuf),
    #[error("project loader task failed: {0}")]
    Join(String),
}

/// Where the gallery is in loading the catalog
#[derive(Debug, Clone, Default)]
pub enum CatalogStatus {
    #[default]
    Loading,
    Ready(Catalog),
    Failed(String),
}

impl CatalogStatus {
    pub fn catalog(&self) -> Option<&Catalog> {
        match self {
            CatalogStatus::Ready(catalog) => Some(catalog),
            _ => None,
        }
    }
}

/// The Catalog holds every project loaded from the site's descriptors,
/// sorted by id.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    projects: Vec<Project>,
}

impl Catalog {
    /// Build a catalog from already loaded projects
    pub fn new(mut projects: Vec<Project>) -> Self {
        projects.sort_by_key(|p| p.id);
        Catalog { projects }
    }

    /// Load every project folder concurrently and keep the ones that parse.
    ///
    /// Folders without a descriptor, with a malformed one, or whose loader
    /// task died are logged and skipped. An empty result is an error.
    pub async fn load(projects_dir: PathBuf, folders: Vec<String>) -> Result<Self, CatalogError> {
        let folders = if folders.is_empty() {
            discover_folders(&projects_dir)
        } else {
            folders
        };

        tracing::info!(
            count = folders.len(),
            dir = %projects_dir.display(),
            "Loading project descriptors"
        );

        // One task per folder, all in flight before the first await
        let loaders: Vec<_> = folders
            .into_iter()
            .map(|folder| {
                let descriptor = projects_dir.join(&folder).join(DESCRIPTOR_FILE);
                (folder, tokio::spawn(async move { load_project(&descriptor).await }))
            })
            .collect();

        let projects = collect_projects(loaders).await;

        if projects.is_empty() {
            return Err(CatalogError::Empty(projects_dir));
        }

        tracing::info!("{} projects loaded", projects.len());
        Ok(Catalog::new(projects))
    }

    /// All projects in id order
    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn len(&self) -> usize {
        self.projects.len()
    }

    /// Projects matching `filter`, in id order
    pub fn filtered<'a>(&'a self, filter: &'a CategoryFilter) -> impl Iterator<Item = &'a Project> + 'a {
        self.projects.iter().filter(move |p| filter.matches(p))
    }

    /// Find a project by id
    pub fn find(&self, id: i64) -> Option<&Project> {
        self.projects.iter().find(|p| p.id == id)
    }

    /// Distinct categories in first-seen order
    pub fn categories(&self) -> Vec<String> {
        let mut categories: Vec<String> = Vec::new();
        for project in &self.projects {
            if !categories.contains(&project.category) {
                categories.push(project.category.clone());
            }
        }
        categories
    }
}

/// Await every loader and keep what loaded. A folder whose descriptor is
/// missing, malformed or whose task died is logged and left out.
async fn collect_projects(
    loaders: Vec<(String, JoinHandle<Result<Option<Project>, CatalogError>>)>,
) -> Vec<Project> {
    let mut projects = Vec::new();
    for (folder, handle) in loaders {
        let result = handle.await.map_err(|e| CatalogError::Join(e.to_string()));

        match result.and_then(|loaded| loaded) {
            Ok(Some(project)) => projects.push(project),
            Ok(None) => {
                tracing::warn!(folder = %folder, "{} not found, skipping", DESCRIPTOR_FILE);
            }
            Err(e) => {
                tracing::error!(folder = %folder, error = %e, "Failed to load project");
            }
        }
    }
    projects
}

/// Read and parse one descriptor. `Ok(None)` when the file does not exist.
pub async fn load_project(descriptor: &Path) -> Result<Option<Project>, CatalogError> {
    let text = match tokio::fs::read_to_string(descriptor).await {
        Ok(text) => text,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(source) => {
            return Err(CatalogError::Io {
                path: descriptor.to_path_buf(),
                source,
            })
        }
    };

    serde_json::from_str(&text)
        .map(Some)
        .map_err(|source| CatalogError::Parse {
            path: descriptor.to_path_buf(),
            source,
        })
}

/// Every directory directly under `projects_dir` that holds a descriptor,
/// sorted by name
pub fn discover_folders(projects_dir: &Path) -> Vec<String> {
    let mut folders: Vec<String> = WalkDir::new(projects_dir)
        .min_depth(2)
        .max_depth(2)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file() && e.file_name() == DESCRIPTOR_FILE)
        .filter_map(|e| {
            e.path()
                .parent()
                .and_then(Path::file_name)
                .map(|name| name.to_string_lossy().to_string())
        })
        .collect();

    folders.sort();
    folders
}
