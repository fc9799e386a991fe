use clap::Parser;
use iced::widget::image::Handle;
use iced::widget::{button, center, column, container, mouse_area, opaque, row, scrollable, text, Space, Stack};
use iced::{keyboard, Alignment, Color, Element, Length, Subscription, Task, Theme};
use rfd::FileDialog;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

mod config;
mod media;
mod state;
mod ui;

use config::{Cli, Config};
use media::placeholder::PlaceholderSize;
use media::ImageCache;
use state::catalog::{Catalog, CatalogStatus};
use state::data::CategoryFilter;
use state::detail::DetailPanel;
use state::lightbox::{Command, Navigator};

/// Main application state
struct PortfolioViewer {
    config: Config,
    /// Projects loaded from the site's descriptors
    catalog: CatalogStatus,
    /// Category shown in the gallery
    filter: CategoryFilter,
    /// Project open in the detail panel, if any
    detail: Option<DetailPanel>,
    /// The image lightbox above the detail panel
    navigator: Navigator,
    /// Decoded images and placeholders
    images: ImageCache,
    /// Bumped on every site switch; results from older loads are dropped
    generation: u64,
}

/// Application messages (events)
#[derive(Debug, Clone)]
pub enum Message {
    /// Background catalog load finished for the given site generation
    CatalogLoaded(u64, Result<Catalog, String>),
    /// User picked a category in the filter bar
    FilterSelected(CategoryFilter),
    /// User clicked a gallery card
    ProjectOpened(i64),
    /// Detail panel close control, or a click outside the panel
    DetailClosed,
    /// User clicked a thumbnail in the detail panel
    ThumbnailSelected(usize),
    /// User clicked the detail panel's main image
    MainImagePressed,
    /// Lightbox control (prev/next, close glyph, backdrop click)
    Lightbox(Command),
    /// Key pressed while the lightbox is open
    KeyPressed(keyboard::Key),
    /// Background image decode finished for the given site generation
    ImageLoaded(u64, String, Result<Handle, String>),
    /// User clicked the "Open Site Folder" button
    OpenSiteFolder,
}

impl PortfolioViewer {
    /// Create a new instance of the application and start loading the catalog
    fn new(config: Config) -> (Self, Task<Message>) {
        let viewer = PortfolioViewer {
            config,
            catalog: CatalogStatus::Loading,
            filter: CategoryFilter::All,
            detail: None,
            navigator: Navigator::new(),
            images: ImageCache::new(),
            generation: 0,
        };
        let task = viewer.load_catalog();
        (viewer, task)
    }

    /// Handle application messages and update state
    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::CatalogLoaded(generation, _) | Message::ImageLoaded(generation, ..)
                if generation != self.generation =>
            {
                tracing::debug!(generation, "Dropping result from a previous site");
                Task::none()
            }
            Message::CatalogLoaded(_, Ok(catalog)) => {
                tracing::info!("Portfolio ready with {} projects", catalog.len());
                self.images.prepare_placeholders(0, PlaceholderSize::Card);
                let covers: Vec<String> = catalog.projects().iter().map(|p| p.cover.clone()).collect();
                self.catalog = CatalogStatus::Ready(catalog);
                self.load_images(covers)
            }
            Message::CatalogLoaded(_, Err(e)) => {
                tracing::error!(error = %e, "Failed to load projects");
                self.catalog = CatalogStatus::Failed(e);
                Task::none()
            }
            Message::FilterSelected(filter) => {
                self.filter = filter;
                Task::none()
            }
            Message::ProjectOpened(id) => {
                let Some(project) = self.catalog.catalog().and_then(|c| c.find(id)).cloned() else {
                    tracing::warn!(id, "Unknown project");
                    return Task::none();
                };

                self.images.prepare_placeholders(project.images.len(), PlaceholderSize::Main);
                self.images.prepare_placeholders(project.images.len(), PlaceholderSize::Thumb);

                let refs: Vec<String> = std::iter::once(project.cover.clone())
                    .chain(project.images.iter().cloned())
                    .collect();
                self.detail = Some(DetailPanel::open(project));
                self.load_images(refs)
            }
            Message::DetailClosed => {
                // The lightbox never outlives its panel
                self.navigator.close();
                self.detail = None;
                Task::none()
            }
            Message::ThumbnailSelected(index) => {
                if let Some(panel) = &mut self.detail {
                    panel.select_thumbnail(index);
                }
                Task::none()
            }
            Message::MainImagePressed => {
                if let Some(panel) = &self.detail {
                    self.navigator.dispatch(panel.lightbox_request());
                }
                Task::none()
            }
            Message::Lightbox(command) => {
                self.navigator.dispatch(command);
                Task::none()
            }
            Message::KeyPressed(key) => {
                if self.navigator.is_open() {
                    if let Some(command) = ui::lightbox::command_for_key(&key) {
                        self.navigator.dispatch(command);
                    }
                }
                Task::none()
            }
            Message::ImageLoaded(_, image, result) => {
                self.images.finish(image, result);
                Task::none()
            }
            Message::OpenSiteFolder => {
                // Show the native folder picker dialog
                let folder = FileDialog::new()
                    .set_title("Select Portfolio Site Folder")
                    .pick_folder();

                match folder {
                    Some(root) => self.switch_site(root),
                    None => Task::none(),
                }
            }
        }
    }

    /// Build the user interface
    fn view(&self) -> Element<Message> {
        let header = row![
            text("Portfolio").size(32),
            Space::with_width(Length::Fill),
            text(self.config.site_root.display().to_string()).size(14),
            button("Open Site Folder")
                .on_press(Message::OpenSiteFolder)
                .padding(10),
        ]
        .spacing(20)
        .align_y(Alignment::Center);

        let gallery = ui::gallery::view(&self.catalog, &self.filter, &self.images);

        let base = container(column![header, scrollable(gallery)].spacing(24).padding(40))
            .width(Length::Fill)
            .height(Length::Fill);

        let mut layers = Stack::new()
            .width(Length::Fill)
            .height(Length::Fill)
            .push(base);

        if let Some(panel) = &self.detail {
            let content = ui::detail::view(panel, self.navigator.panel_visibility(), &self.images);
            layers = layers.push(modal(content, Message::DetailClosed));
        }

        if let Some(lightbox) = ui::lightbox::view(&self.navigator, &self.images) {
            layers = layers.push(lightbox);
        }

        layers.into()
    }

    /// Keyboard navigation is only live while the lightbox is open
    fn subscription(&self) -> Subscription<Message> {
        if self.navigator.is_open() {
            keyboard::on_key_press(|key, _modifiers| Some(Message::KeyPressed(key)))
        } else {
            Subscription::none()
        }
    }

    /// Set the application theme
    fn theme(&self) -> Theme {
        Theme::Dark
    }

    fn load_catalog(&self) -> Task<Message> {
        let generation = self.generation;
        Task::perform(
            Catalog::load(self.config.projects_path(), self.config.folders.clone()),
            move |result| Message::CatalogLoaded(generation, result.map_err(|e| e.to_string())),
        )
    }

    /// Start decoding every reference not seen yet this session
    fn load_images(&mut self, refs: Vec<String>) -> Task<Message> {
        let root = self.config.site_root.clone();
        let max_dimension = self.config.max_image_dimension;
        let generation = self.generation;

        let tasks: Vec<Task<Message>> = refs
            .into_iter()
            .filter(|image| self.images.request(image))
            .map(|image| {
                Task::perform(
                    media::loader::load_image(root.clone(), image.clone(), max_dimension),
                    move |result| {
                        Message::ImageLoaded(
                            generation,
                            image.clone(),
                            result.map_err(|e| e.to_string()),
                        )
                    },
                )
            })
            .collect();

        Task::batch(tasks)
    }

    /// Drop everything tied to the current site and reload from `root`
    fn switch_site(&mut self, root: std::path::PathBuf) -> Task<Message> {
        tracing::info!(root = %root.display(), "Switching site root");

        self.navigator.close();
        self.detail = None;
        self.filter = CategoryFilter::All;
        self.images.clear();
        self.catalog = CatalogStatus::Loading;
        self.config.site_root = root;
        self.generation += 1;

        self.load_catalog()
    }
}

/// Centered content over a dimmed backdrop; clicking the backdrop sends `on_blur`
fn modal<'a>(content: Element<'a, Message>, on_blur: Message) -> Element<'a, Message> {
    opaque(
        mouse_area(center(opaque(content)).style(|_theme| container::Style {
            background: Some(
                Color {
                    a: 0.8,
                    ..Color::BLACK
                }
                .into(),
            ),
            ..container::Style::default()
        }))
        .on_press(on_blur),
    )
}

fn setup_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder().with_env_filter(filter).finish();
    let _ = tracing::subscriber::set_global_default(subscriber);
}

fn main() -> iced::Result {
    setup_logging();

    let cli = Cli::parse();
    let config = Config::load(&cli).unwrap_or_else(|e| {
        tracing::error!("{}; using defaults", e);
        let mut config = Config::default();
        config.apply_cli(&cli);
        config
    });

    tracing::info!(
        root = %config.site_root.display(),
        projects = %config.projects_path().display(),
        "Portfolio viewer starting"
    );

    iced::application("Portfolio Viewer", PortfolioViewer::update, PortfolioViewer::view)
        .subscription(PortfolioViewer::subscription)
        .theme(PortfolioViewer::theme)
        .centered()
        .run_with(move || PortfolioViewer::new(config))
}

#[cfg(test)]
mod tests {
    use super::*;
    use iced::keyboard::{key::Named, Key};
    use crate::state::data::Project;
    use crate::state::lightbox::{Direction, PanelVisibility};

    fn project(id: i64, category: &str, images: &[&str]) -> Project {
        Project {
            id,
            title: format!("Project {id}"),
            category: category.to_string(),
            description: String::new(),
            cover: format!("cover_{id}.jpg"),
            images: images.iter().map(|s| s.to_string()).collect(),
            details: None,
        }
    }

    fn viewer() -> PortfolioViewer {
        let catalog = Catalog::new(vec![
            project(1, "residencial", &["a.jpg", "b.jpg", "c.jpg"]),
            project(2, "comercial", &[]),
        ]);
        PortfolioViewer {
            config: Config::default(),
            catalog: CatalogStatus::Ready(catalog),
            filter: CategoryFilter::All,
            detail: None,
            navigator: Navigator::new(),
            images: ImageCache::new(),
            generation: 0,
        }
    }

    #[test]
    fn test_main_image_opens_lightbox_at_selected_thumbnail() {
        let mut app = viewer();
        let _ = app.update(Message::ProjectOpened(1));
        let _ = app.update(Message::ThumbnailSelected(2));
        let _ = app.update(Message::MainImagePressed);

        let frame = app.navigator.frame().unwrap();
        assert_eq!(frame.image, "c.jpg");
        assert_eq!(frame.label(), "3 / 3");
        assert_eq!(app.navigator.panel_visibility(), PanelVisibility::HIDDEN);
    }

    #[test]
    fn test_keys_drive_lightbox_only_while_open() {
        let mut app = viewer();
        let _ = app.update(Message::ProjectOpened(1));

        let _ = app.update(Message::KeyPressed(Key::Named(Named::ArrowRight)));
        assert!(!app.navigator.is_open());
        assert_eq!(app.navigator.current_index(), 0);

        let _ = app.update(Message::MainImagePressed);
        let _ = app.update(Message::KeyPressed(Key::Named(Named::ArrowLeft)));
        assert_eq!(app.navigator.current_index(), 2);

        let _ = app.update(Message::KeyPressed(Key::Named(Named::Escape)));
        assert!(!app.navigator.is_open());
        assert_eq!(app.navigator.panel_visibility(), PanelVisibility::VISIBLE);
        assert!(app.detail.is_some());
    }

    #[test]
    fn test_closing_detail_closes_lightbox() {
        let mut app = viewer();
        let _ = app.update(Message::ProjectOpened(1));
        let _ = app.update(Message::MainImagePressed);
        let _ = app.update(Message::Lightbox(Command::Navigate(Direction::Next)));

        let _ = app.update(Message::DetailClosed);
        assert!(app.detail.is_none());
        assert!(!app.navigator.is_open());
        assert_eq!(app.navigator.panel_visibility(), PanelVisibility::VISIBLE);
    }

    #[test]
    fn test_project_without_images_keeps_lightbox_closed() {
        let mut app = viewer();
        let _ = app.update(Message::ProjectOpened(2));
        let _ = app.update(Message::MainImagePressed);
        assert!(!app.navigator.is_open());
    }

    #[test]
    fn test_unknown_project_is_ignored() {
        let mut app = viewer();
        let _ = app.update(Message::ProjectOpened(42));
        assert!(app.detail.is_none());
    }

    #[test]
    fn test_opening_project_requests_its_images_once() {
        let mut app = viewer();
        let _ = app.update(Message::ProjectOpened(1));
        assert!(!app.images.request("a.jpg"));
        assert!(!app.images.request("cover_1.jpg"));
        assert!(app.images.request("cover_2.jpg"));
    }

    #[test]
    fn test_catalog_error_is_shown() {
        let mut app = viewer();
        let _ = app.update(Message::CatalogLoaded(0, Err("no project could be loaded".into())));
        assert!(matches!(app.catalog, CatalogStatus::Failed(_)));
    }

    #[test]
    fn test_results_from_previous_site_are_dropped() {
        let mut app = viewer();
        let old_catalog = app.catalog.catalog().cloned().unwrap();
        let _ = app.switch_site(std::env::temp_dir().join("other-site"));
        assert_eq!(app.generation, 1);

        let _ = app.update(Message::CatalogLoaded(0, Ok(old_catalog)));
        assert!(matches!(app.catalog, CatalogStatus::Loading));

        let stale = Handle::from_rgba(1, 1, vec![0, 0, 0, 255]);
        let _ = app.update(Message::ImageLoaded(0, "a.jpg".into(), Ok(stale)));
        assert!(app.images.state("a.jpg").is_none());
        assert!(app.images.request("a.jpg"));
    }

    #[test]
    fn test_results_from_current_site_are_kept() {
        let mut app = viewer();
        let _ = app.switch_site(std::env::temp_dir().join("other-site"));

        let fresh = Catalog::new(vec![project(9, "comercial", &["x.jpg"])]);
        let _ = app.update(Message::CatalogLoaded(1, Ok(fresh)));
        assert_eq!(app.catalog.catalog().map(Catalog::len), Some(1));

        let _ = app.update(Message::ImageLoaded(1, "cover_9.jpg".into(), Err("missing".into())));
        assert!(!app.images.request("cover_9.jpg"));
    }
}
