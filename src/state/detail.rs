use super::data::Project;
use super::lightbox::Command;

/// The project currently shown in the detail panel and which of its images
/// is the main one.
#[derive(Debug, Clone, PartialEq)]
pub struct DetailPanel {
    project: Project,
    main_index: usize,
}

impl DetailPanel {
    /// Show `project`, starting on its first image
    pub fn open(project: Project) -> Self {
        DetailPanel {
            project,
            main_index: 0,
        }
    }

    pub fn project(&self) -> &Project {
        &self.project
    }

    /// Index of the main image (also the active thumbnail)
    pub fn main_index(&self) -> usize {
        self.main_index
    }

    /// The image drawn large in the panel
    pub fn main_image(&self) -> &str {
        self.project.image_at(self.main_index)
    }

    /// Make thumbnail `index` the main image; out of range is ignored
    pub fn select_thumbnail(&mut self, index: usize) {
        if index < self.project.images.len() {
            self.main_index = index;
        }
    }

    /// Command that opens the lightbox where the panel currently is
    pub fn lightbox_request(&self) -> Command {
        Command::Open {
            sequence: self.project.images.clone(),
            start_index: self.main_index as isize,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::lightbox::Navigator;

    fn project(images: &[&str]) -> Project {
        Project {
            id: 1,
            title: "Casa".into(),
            category: "residencial".into(),
            description: String::new(),
            cover: "cover.jpg".into(),
            images: images.iter().map(|s| s.to_string()).collect(),
            details: None,
        }
    }

    #[test]
    fn test_thumbnail_selection() {
        let mut panel = DetailPanel::open(project(&["a.jpg", "b.jpg", "c.jpg"]));
        assert_eq!(panel.main_image(), "a.jpg");

        panel.select_thumbnail(2);
        assert_eq!(panel.main_index(), 2);
        assert_eq!(panel.main_image(), "c.jpg");

        panel.select_thumbnail(3);
        assert_eq!(panel.main_index(), 2);
    }

    #[test]
    fn test_lightbox_resumes_at_main_image() {
        let mut panel = DetailPanel::open(project(&["a.jpg", "b.jpg", "c.jpg"]));
        panel.select_thumbnail(1);

        let mut nav = Navigator::new();
        nav.dispatch(panel.lightbox_request());
        let frame = nav.frame().unwrap();
        assert_eq!(frame.image, "b.jpg");
        assert_eq!(frame.label(), "2 / 3");
    }

    #[test]
    fn test_project_without_images_never_opens_lightbox() {
        let panel = DetailPanel::open(project(&[]));
        assert_eq!(panel.main_image(), "cover.jpg");

        let mut nav = Navigator::new();
        nav.dispatch(panel.lightbox_request());
        assert!(!nav.is_open());
    }
}
