// SPDX-License-Identifier: MPL-2.0
//! Preview rendering: counter, toolbar and the transformed image.

use super::component::Message;
use super::gallery;
use super::load::{Display, LoadedImage};
use super::transform;
use crate::domain::{PanOffset, TransformState};
use crate::ui::slot::Slot;
use iced::widget::{button, container, Column, Container, Image, Row, Text};
use iced::{Background, Color, Element, Length, Padding, Radians, Rotation, Size, Theme};

const MASK_COLOR: Color = Color {
    r: 0.0,
    g: 0.0,
    b: 0.0,
    a: 0.85,
};

/// Caller-provided content for the preview chrome.
pub struct ViewContext<'a> {
    /// Shown next to the counter.
    pub title: Option<Slot<'a, Message>>,
    /// Shown while the active image is loading.
    pub loading: Slot<'a, Message>,
    /// Shown when the image and its fallback both failed.
    pub placeholder: Slot<'a, Message>,
}

impl Default for ViewContext<'_> {
    fn default() -> Self {
        Self {
            title: None,
            loading: Slot::Text("Loading…".to_string()),
            placeholder: Slot::Text("Image failed to load".to_string()),
        }
    }
}

pub fn view<'a>(ctx: ViewContext<'a>, gallery: &'a gallery::State) -> Element<'a, Message> {
    if !gallery.should_render() {
        return Column::new().into();
    }

    let body = Column::new()
        .push(header(&ctx, gallery))
        .push(stage(&ctx, gallery))
        .push(toolbar(gallery))
        .spacing(8.0)
        .padding(12.0)
        .width(Length::Fill)
        .height(Length::Fill);

    if !gallery.session().is_visible() {
        // Mounted but hidden: closing, or force-rendered while closed.
        return Container::new(body)
            .width(Length::Fixed(0.0))
            .height(Length::Fixed(0.0))
            .clip(true)
            .into();
    }

    Container::new(body)
        .width(Length::Fill)
        .height(Length::Fill)
        .style(|_theme: &Theme| container::Style {
            background: Some(Background::Color(MASK_COLOR)),
            text_color: Some(Color::WHITE),
            ..Default::default()
        })
        .into()
}

fn header<'a>(ctx: &ViewContext<'a>, gallery: &gallery::State) -> Element<'a, Message> {
    let mut row = Row::new().spacing(12.0);

    if gallery.is_grouped() {
        if let Some(label) = counter_label(gallery.counter()) {
            row = row.push(Text::new(label));
        }
    }
    if let Some(title) = &ctx.title {
        row = row.push(title.render());
    }

    row.push(Container::new(Text::new("")).width(Length::Fill))
        .push(button(Text::new("✕")).on_press(gallery_msg(gallery::Message::ClosePreview)))
        .into()
}

fn stage<'a>(ctx: &ViewContext<'a>, gallery: &gallery::State) -> Element<'a, Message> {
    let content = match gallery.active_item() {
        Some(item) => match (item.load.display(), item.load.image()) {
            (Display::Primary | Display::Fallback, Some(image)) => {
                transformed_image(image, gallery.transform())
            }
            (Display::Pending, _) => ctx.loading.render(),
            _ => ctx.placeholder.render(),
        },
        None => ctx.placeholder.render(),
    };

    Container::new(content)
        .center(Length::Fill)
        .clip(true)
        .into()
}

fn transformed_image<'a>(image: &LoadedImage, transform: TransformState) -> Element<'a, Message> {
    let size = scaled_size(image.width, image.height, transform.scale);
    let img = Image::new(image.handle(transform.flip_x, transform.flip_y))
        .width(Length::Fixed(size.width))
        .height(Length::Fixed(size.height))
        .rotation(Rotation::Floating(Radians(transform.rotation_radians())));

    Container::new(img).padding(pan_padding(transform.pan)).into()
}

fn toolbar<'a>(gallery: &gallery::State) -> Element<'a, Message> {
    let controls = gallery.transform_state();
    let nav = gallery.navigation_info();

    let mut row = Row::new().spacing(6.0);
    if gallery.is_grouped() {
        row = row.push(
            button(Text::new("‹"))
                .on_press_maybe(nav.has_previous.then(|| gallery_msg(gallery::Message::Previous))),
        );
    }

    row = row
        .push(
            button(Text::new("−"))
                .on_press_maybe(controls.can_zoom_out().then(|| tx(transform::Message::ZoomOut))),
        )
        .push(
            button(Text::new("+"))
                .on_press_maybe(controls.can_zoom_in().then(|| tx(transform::Message::ZoomIn))),
        )
        .push(button(Text::new("⟲")).on_press(tx(transform::Message::RotateLeft)))
        .push(button(Text::new("⟳")).on_press(tx(transform::Message::RotateRight)))
        .push(button(Text::new("⇋")).on_press(tx(transform::Message::FlipX)))
        .push(button(Text::new("⇵")).on_press(tx(transform::Message::FlipY)))
        .push(button(Text::new("1:1")).on_press(tx(transform::Message::Reset)));

    if gallery.is_grouped() {
        row = row.push(
            button(Text::new("›"))
                .on_press_maybe(nav.has_next.then(|| gallery_msg(gallery::Message::Next))),
        );
    }

    Container::new(row).center_x(Length::Fill).into()
}

fn gallery_msg(msg: gallery::Message) -> Message {
    Message::Gallery(msg)
}

fn tx(msg: transform::Message) -> Message {
    Message::Gallery(gallery::Message::Transform(msg))
}

/// "X / N" with a one-based position.
fn counter_label(counter: Option<(usize, usize)>) -> Option<String> {
    counter.map(|(position, total)| format!("{position} / {total}"))
}

/// Image size at `scale`, never below one pixel.
fn scaled_size(width: u32, height: u32, scale: f32) -> Size {
    Size::new(
        (width as f32 * scale).max(1.0),
        (height as f32 * scale).max(1.0),
    )
}

/// Padding that shifts a centered child by `pan`.
fn pan_padding(pan: PanOffset) -> Padding {
    Padding {
        top: (pan.y * 2.0).max(0.0),
        right: (-pan.x * 2.0).max(0.0),
        bottom: (-pan.y * 2.0).max(0.0),
        left: (pan.x * 2.0).max(0.0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    #[test]
    fn counter_is_one_based() {
        assert_eq!(counter_label(Some((2, 5))).as_deref(), Some("2 / 5"));
        assert_eq!(counter_label(None), None);
    }

    #[test]
    fn scaled_size_multiplies_dimensions() {
        assert_eq!(scaled_size(200, 100, 1.5), Size::new(300.0, 150.0));
        assert_eq!(scaled_size(0, 0, 2.0), Size::new(1.0, 1.0));
    }

    #[test]
    fn pan_padding_shifts_towards_offset() {
        let padding = pan_padding(PanOffset::new(10.0, -4.0));
        assert_eq!(padding.left, 20.0);
        assert_eq!(padding.right, 0.0);
        assert_eq!(padding.top, 0.0);
        assert_eq!(padding.bottom, 8.0);
        assert_eq!(pan_padding(PanOffset::ZERO), Padding::ZERO);
    }
}
