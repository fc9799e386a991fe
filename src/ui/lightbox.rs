//! Full-screen image viewer drawn above the detail panel
use iced::keyboard::{self, key::Named};
use iced::widget::image::Handle;
use iced::widget::{
    button, center, column, container, image, mouse_area, opaque, responsive, row, text, Space,
};
use iced::{Alignment, Color, ContentFit, Element, Length, Size};

use crate::media::{placeholder::PlaceholderSize, ImageCache};
use crate::state::lightbox::{Command, Direction, Navigator};
use crate::Message;

/// Map a key press to a lightbox command. Only meaningful while open.
pub fn command_for_key(key: &keyboard::Key) -> Option<Command> {
    match key {
        keyboard::Key::Named(Named::ArrowLeft) => Some(Command::Navigate(Direction::Previous)),
        keyboard::Key::Named(Named::ArrowRight) => Some(Command::Navigate(Direction::Next)),
        keyboard::Key::Named(Named::Escape) => Some(Command::Close),
        _ => None,
    }
}

/// The overlay layer, or `None` while the lightbox is closed
pub fn view<'a>(navigator: &'a Navigator, images: &'a ImageCache) -> Option<Element<'a, Message>> {
    let frame = navigator.frame()?;
    let handle = images.handle_for(frame.image, Some(frame.position), PlaceholderSize::Main);
    let alt = frame.alt();

    // Only the drawn image swallows clicks; the bars around it are backdrop
    let picture = responsive(move |area| -> Element<'a, Message> {
        match &handle {
            Some(handle) => {
                let size = fitted_size(handle, area);
                center(opaque(
                    image(handle.clone())
                        .content_fit(ContentFit::ScaleDown)
                        .width(size.width)
                        .height(size.height),
                ))
                .into()
            }
            None => center(text(format!("Loading {}...", alt.to_lowercase())).color(Color::WHITE))
                .into(),
        }
    });

    let close = button(text("×").size(35).color(Color::WHITE))
        .style(button::text)
        .on_press(Message::Lightbox(Command::Close));

    let controls = row![
        nav_button("‹", Direction::Previous),
        text(frame.label()).size(18).color(Color::WHITE),
        nav_button("›", Direction::Next),
    ]
    .spacing(20)
    .align_y(Alignment::Center);

    let content = column![
        row![Space::with_width(Length::Fill), close],
        container(picture).width(Length::Fill).height(Length::Fill),
        opaque(controls),
    ]
    .spacing(20)
    .align_x(Alignment::Center)
    .width(Length::Fill)
    .height(Length::Fill);

    // Clicks that reach the backdrop close the lightbox
    let backdrop = mouse_area(
        container(content)
            .padding(20)
            .width(Length::Fill)
            .height(Length::Fill)
            .style(|_theme| container::Style {
                background: Some(Color::from_rgba(0.0, 0.0, 0.0, 0.95).into()),
                ..container::Style::default()
            }),
    )
    .on_press(Message::Lightbox(Command::Close));

    Some(opaque(backdrop))
}

/// On-screen size of `handle` inside `area`: scaled down to fit, never up.
/// Handles without known pixel dimensions take the whole area.
pub fn fitted_size(handle: &Handle, area: Size) -> Size {
    match handle {
        Handle::Rgba { width, height, .. } => {
            ContentFit::ScaleDown.fit(Size::new(*width as f32, *height as f32), area)
        }
        _ => area,
    }
}

fn nav_button(glyph: &str, direction: Direction) -> Element<'_, Message> {
    button(
        center(text(glyph).size(24).color(Color::WHITE))
            .width(50.0)
            .height(50.0),
    )
    .padding(0)
    .style(|theme, status| {
        let base = button::secondary(theme, status);
        button::Style {
            background: Some(Color::from_rgba(1.0, 1.0, 1.0, 0.1).into()),
            border: iced::Border::default()
                .rounded(25.0)
                .color(Color::from_rgba(1.0, 1.0, 1.0, 0.3))
                .width(2.0),
            ..base
        }
    })
    .on_press(Message::Lightbox(Command::Navigate(direction)))
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use iced::keyboard::Key;

    #[test]
    fn test_arrow_keys_navigate() {
        assert_eq!(
            command_for_key(&Key::Named(Named::ArrowLeft)),
            Some(Command::Navigate(Direction::Previous))
        );
        assert_eq!(
            command_for_key(&Key::Named(Named::ArrowRight)),
            Some(Command::Navigate(Direction::Next))
        );
    }

    #[test]
    fn test_escape_closes_and_other_keys_are_ignored() {
        assert_eq!(command_for_key(&Key::Named(Named::Escape)), Some(Command::Close));
        assert_eq!(command_for_key(&Key::Named(Named::ArrowUp)), None);
        assert_eq!(command_for_key(&Key::Character("a".into())), None);
    }

    #[test]
    fn test_view_only_while_open() {
        let mut nav = Navigator::new();
        let cache = ImageCache::new();
        assert!(view(&nav, &cache).is_none());

        nav.open(vec!["a.jpg".into()], 0);
        assert!(view(&nav, &cache).is_some());
    }

    #[test]
    fn test_wide_image_leaves_backdrop_above_and_below() {
        let wide = Handle::from_rgba(400, 100, vec![0; 400 * 100 * 4]);
        let area = Size::new(800.0, 600.0);

        let drawn = fitted_size(&wide, area);
        assert_eq!(drawn, Size::new(400.0, 100.0));
        assert!(drawn.height < area.height);
    }

    #[test]
    fn test_large_portrait_scales_down_and_leaves_side_bars() {
        let tall = Handle::from_rgba(300, 1200, vec![0; 300 * 1200 * 4]);
        let area = Size::new(800.0, 600.0);

        let drawn = fitted_size(&tall, area);
        assert_eq!(drawn, Size::new(150.0, 600.0));
        assert!(drawn.width < area.width);
    }
}
