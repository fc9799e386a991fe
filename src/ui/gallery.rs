//! Portfolio grid with its category filter bar
use iced::widget::{button, center, column, container, image, mouse_area, text, Row};
use iced::{Alignment, ContentFit, Element, Length, Pixels};
use iced_aw::Wrap;

use crate::media::{placeholder::PlaceholderSize, ImageCache};
use crate::state::catalog::{Catalog, CatalogStatus};
use crate::state::data::{CategoryFilter, Project, CARD_DESCRIPTION_LIMIT};
use crate::Message;

const CARD_WIDTH: f32 = 300.0;

pub fn view<'a>(
    status: &'a CatalogStatus,
    filter: &'a CategoryFilter,
    images: &'a ImageCache,
) -> Element<'a, Message> {
    match status {
        CatalogStatus::Loading => message("Loading projects...", None),
        CatalogStatus::Failed(error) => message("Error loading projects", Some(error.as_str())),
        CatalogStatus::Ready(catalog) => column![filter_bar(catalog, filter), grid(catalog, filter, images)]
            .spacing(24)
            .into(),
    }
}

fn filter_bar<'a>(catalog: &'a Catalog, active: &'a CategoryFilter) -> Element<'a, Message> {
    let filters = std::iter::once(CategoryFilter::All)
        .chain(catalog.categories().into_iter().map(CategoryFilter::Only));

    filters
        .fold(Row::new().spacing(8), |bar, filter| {
            let style = if filter == *active {
                button::primary
            } else {
                button::secondary
            };
            bar.push(
                button(text(filter.label()))
                    .style(style)
                    .padding([6, 16])
                    .on_press(Message::FilterSelected(filter)),
            )
        })
        .into()
}

fn grid<'a>(
    catalog: &'a Catalog,
    filter: &'a CategoryFilter,
    images: &'a ImageCache,
) -> Element<'a, Message> {
    let cards: Vec<Element<'a, Message>> = catalog
        .filtered(filter)
        .map(|project| card(project, images))
        .collect();

    if cards.is_empty() {
        return message("No projects found in this category.", None);
    }

    Wrap::with_elements(cards)
        .spacing(Pixels(16.0))
        .line_spacing(Pixels(16.0))
        .into()
}

fn card<'a>(project: &'a Project, images: &'a ImageCache) -> Element<'a, Message> {
    let cover: Element<'a, Message> =
        match images.handle_for(&project.cover, None, PlaceholderSize::Card) {
            Some(handle) => image(handle)
                .content_fit(ContentFit::Cover)
                .width(Length::Fill)
                .height(200.0)
                .into(),
            None => center(text("Loading...")).height(200.0).into(),
        };

    let info = column![
        text(project.display_category()).size(12),
        text(&project.title).size(20),
        text(project.truncated_description(CARD_DESCRIPTION_LIMIT)).size(14),
        button(text("View more photos"))
            .style(button::primary)
            .on_press(Message::ProjectOpened(project.id)),
    ]
    .spacing(8)
    .padding(12);

    mouse_area(
        container(column![cover, info].align_x(Alignment::Start))
            .width(CARD_WIDTH)
            .style(container::rounded_box),
    )
    .on_press(Message::ProjectOpened(project.id))
    .into()
}

fn message<'a>(title: &'a str, detail: Option<&'a str>) -> Element<'a, Message> {
    let mut content = column![text(title).size(22)]
        .spacing(8)
        .align_x(Alignment::Center);
    if let Some(detail) = detail {
        content = content.push(text(detail).size(14));
    }

    container(content)
        .width(Length::Fill)
        .padding(32)
        .center_x(Length::Fill)
        .into()
}
