//! Project detail panel: header, main image, thumbnail strip and technical sheet
use iced::widget::{
    button, center, column, container, image, mouse_area, row, scrollable, text, Column, Space,
};
use iced::{Alignment, Color, ContentFit, Element, Length};

use crate::media::{placeholder::PlaceholderSize, ImageCache};
use crate::state::detail::DetailPanel;
use crate::state::lightbox::PanelVisibility;
use crate::Message;

/// Build the panel, honouring which regions the lightbox currently hides
pub fn view<'a>(
    panel: &'a DetailPanel,
    visibility: PanelVisibility,
    images: &'a ImageCache,
) -> Element<'a, Message> {
    let project = panel.project();
    let mut content = Column::new().spacing(16).padding(24);

    if visibility.header || visibility.close_control {
        let mut header = row![].spacing(12).align_y(Alignment::Center);
        if visibility.header {
            header = header.push(
                column![
                    text(&project.title).size(28),
                    text(project.display_category()).size(14),
                ]
                .spacing(4),
            );
        }
        header = header.push(Space::with_width(Length::Fill));
        if visibility.close_control {
            header = header.push(
                button(text("×").size(28))
                    .style(button::text)
                    .on_press(Message::DetailClosed),
            );
        }
        content = content.push(header);
    }

    if visibility.body {
        content = content.push(body(panel, images));
    }

    container(scrollable(content))
        .max_width(960.0)
        .style(container::rounded_box)
        .into()
}

fn body<'a>(panel: &'a DetailPanel, images: &'a ImageCache) -> Element<'a, Message> {
    let project = panel.project();

    let position = if project.images.is_empty() {
        None
    } else {
        Some(panel.main_index() + 1)
    };
    let main = mouse_area(picture(
        images,
        panel.main_image(),
        position,
        PlaceholderSize::Main,
        Length::Fixed(420.0),
    ))
    .on_press(Message::MainImagePressed);

    let thumbnails = project
        .images
        .iter()
        .enumerate()
        .fold(row![].spacing(8), |strip, (index, img)| {
            let thumb = button(picture(
                images,
                img,
                Some(index + 1),
                PlaceholderSize::Thumb,
                Length::Fixed(100.0),
            ))
            .padding(2)
            .width(150.0)
            .style(if index == panel.main_index() {
                button::primary
            } else {
                button::secondary
            })
            .on_press(Message::ThumbnailSelected(index));
            strip.push(thumb)
        });

    let mut body = column![
        main,
        scrollable(thumbnails).direction(scrollable::Direction::Horizontal(
            scrollable::Scrollbar::default()
        )),
        text(&project.description).size(16),
    ]
    .spacing(16);

    if let Some(details) = &project.details {
        let sheet = details
            .rows()
            .into_iter()
            .fold(column![].spacing(8), |sheet, (label, value)| {
                sheet.push(
                    column![
                        text(label).size(13).color(Color::from_rgb(0.6, 0.65, 0.7)),
                        text(value.to_string()).size(16),
                    ]
                    .spacing(2),
                )
            });
        body = body.push(sheet);
    }

    body.into()
}

/// A loaded image, its placeholder, or a loading label
fn picture<'a>(
    images: &ImageCache,
    image_ref: &str,
    position: Option<usize>,
    size: PlaceholderSize,
    height: Length,
) -> Element<'a, Message> {
    match images.handle_for(image_ref, position, size) {
        Some(handle) => image(handle)
            .content_fit(ContentFit::Contain)
            .width(Length::Fill)
            .height(height)
            .into(),
        None => center(text("Loading...")).height(height).into(),
    }
}
