// SPDX-License-Identifier: MPL-2.0
//! Demo application: an image list that opens the gallery preview.
//!
//! The `App` struct wires the preview component to the configuration, the
//! filesystem loader and the diagnostics trail. Parent-side reactions to
//! preview events (logging, the failure notice) live here so the component
//! stays free of application policy.

mod message;
mod subscription;

pub use message::{Flags, Message};

use crate::application::port::ImageLoader;
use crate::config;
use crate::diagnostics::{DiagnosticsLog, PreviewStateEvent};
use crate::domain::ImageSource;
use crate::infrastructure::FsImageLoader;
use crate::ui::preview::component::{self, Preview};
use crate::ui::preview::gallery;
use iced::widget::{button, scrollable, Column, Container, Stack, Text};
use iced::{window, Element, Length, Subscription, Task};
use std::fmt;
use std::sync::Arc;

pub const WINDOW_DEFAULT_WIDTH: f32 = 900.0;
pub const WINDOW_DEFAULT_HEIGHT: f32 = 650.0;

/// Root application state.
pub struct App {
    preview: Preview,
    diagnostics: DiagnosticsLog,
    /// Last load failure, shown under the list.
    notice: Option<String>,
}

impl fmt::Debug for App {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("App")
            .field("images", &self.preview.gallery().len())
            .field("diagnostics", &self.diagnostics.len())
            .finish_non_exhaustive()
    }
}

/// Entry point used by `main.rs` to launch the Iced application loop.
pub fn run(flags: Flags) -> iced::Result {
    use std::cell::RefCell;

    // iced 0.14 requires an Fn boot closure; the flags are consumed once.
    let boot_state = RefCell::new(Some(flags));
    let boot = move || {
        let flags = boot_state.borrow_mut().take().unwrap_or_default();
        App::new(flags)
    };

    iced::application(boot, App::update, App::view)
        .title(App::title)
        .window(window::Settings {
            size: iced::Size::new(WINDOW_DEFAULT_WIDTH, WINDOW_DEFAULT_HEIGHT),
            ..window::Settings::default()
        })
        .subscription(App::subscription)
        .run()
}

impl App {
    /// Loads the configuration and starts decoding every image.
    pub fn new(flags: Flags) -> (Self, Task<Message>) {
        let (config, warning) = config::load_with_override(flags.config_dir);
        if let Some(key) = warning {
            tracing::warn!(%key, "using default configuration");
        }

        let loader: Arc<dyn ImageLoader> = Arc::new(FsImageLoader::new());
        Self::with_loader(flags.images, config.gallery_settings(), loader)
    }

    /// Builds the app around an arbitrary loader.
    pub fn with_loader(
        images: Vec<String>,
        settings: gallery::Settings,
        loader: Arc<dyn ImageLoader>,
    ) -> (Self, Task<Message>) {
        let sources: Vec<ImageSource> = images.into_iter().map(ImageSource::new).collect();
        tracing::info!(count = sources.len(), "starting preview demo");

        let (preview, task) = Preview::new(sources, settings, loader);
        let app = Self {
            preview,
            diagnostics: DiagnosticsLog::default(),
            notice: None,
        };
        (app, task.map(Message::Preview))
    }

    fn title(&self) -> String {
        match self.preview.gallery().active_source() {
            Some(source) if self.preview.gallery().session().is_visible() => {
                format!("{} - Iced Preview", source.file_name())
            }
            _ => "Iced Preview".to_string(),
        }
    }

    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::Preview(msg) => {
                if let Some(action) = msg.user_action() {
                    let details = self
                        .preview
                        .gallery()
                        .active_source()
                        .map(|source| source.file_name().to_string());
                    self.diagnostics.log_action(action, details);
                }
                let (event, task) = self.preview.update(msg);
                self.handle_preview_event(event);
                task.map(Message::Preview)
            }
            Message::ExportDiagnostics => match self.diagnostics.export_json() {
                Ok(json) => iced::clipboard::write(json),
                Err(err) => {
                    tracing::warn!(error = %err, "diagnostics export failed");
                    Task::none()
                }
            },
        }
    }

    fn handle_preview_event(&mut self, event: component::Event) {
        match event {
            component::Event::None | component::Event::Navigated(_) => {}
            component::Event::VisibilityChanged(true) => {
                self.notice = None;
                self.diagnostics.log_state(PreviewStateEvent::Opened);
            }
            component::Event::VisibilityChanged(false) => {
                self.diagnostics.log_state(PreviewStateEvent::Closing);
            }
            component::Event::AfterClose => {
                self.diagnostics.log_state(PreviewStateEvent::Closed);
            }
            component::Event::ImageReady(index) => {
                self.diagnostics
                    .log_state(PreviewStateEvent::ImageLoaded { index });
            }
            component::Event::LoadFailed {
                index,
                source,
                reason,
            } => {
                self.notice = Some(format!("{}: {reason}", source.file_name()));
                self.diagnostics
                    .log_state(PreviewStateEvent::ImageLoadFailed { index, reason });
            }
        }
    }

    pub fn view(&self) -> Element<'_, Message> {
        let gallery = self.preview.gallery();

        let mut list = Column::new().spacing(4.0).padding(16.0);
        if gallery.is_empty() {
            list = list.push(Text::new("Pass image paths on the command line."));
        }
        for (index, item) in gallery.items().iter().enumerate() {
            list = list.push(
                button(Text::new(item.source().file_name().to_string())).on_press(
                    Message::Preview(component::Message::Gallery(
                        gallery::Message::OpenPreview(index),
                    )),
                ),
            );
        }
        if let Some(notice) = &self.notice {
            list = list.push(Text::new(notice.clone()));
        }
        list = list.push(
            button(Text::new("Copy diagnostics")).on_press(Message::ExportDiagnostics),
        );

        let base = Container::new(scrollable(list))
            .width(Length::Fill)
            .height(Length::Fill);

        let overlay = self.preview.view().map(Message::Preview);
        if overlay_on_top(self.preview.z_index()) {
            Stack::new().push(base).push(overlay).into()
        } else {
            Stack::new().push(overlay).push(base).into()
        }
    }

    fn subscription(&self) -> Subscription<Message> {
        subscription::create_event_subscription(self.preview.wants_input())
    }

    #[must_use]
    pub fn preview(&self) -> &Preview {
        &self.preview
    }

    #[must_use]
    pub fn diagnostics(&self) -> &DiagnosticsLog {
        &self.diagnostics
    }

    #[must_use]
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }
}

/// Whether a surface at `z_index` sits above the list, which is layer 0.
fn overlay_on_top(z_index: i32) -> bool {
    z_index >= 0
}
