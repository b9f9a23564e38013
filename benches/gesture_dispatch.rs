// SPDX-License-Identifier: MPL-2.0
//! Benchmarks for input dispatch through the preview controllers.
//!
//! Measures the performance of:
//! - Reducing raw iced events into gestures
//! - A drag-and-zoom burst applied to an open gallery
//! - Replacing a large image list while preserving load state

use criterion::{criterion_group, criterion_main, Criterion};
use iced::mouse::{self, ScrollDelta};
use iced::{Event, Point};
use iced_preview::domain::ImageSource;
use iced_preview::ui::preview::gallery::{self, Message, State};
use iced_preview::ui::preview::gesture::GestureEvent;
use std::hint::black_box;

fn sources(count: usize) -> Vec<ImageSource> {
    (0..count)
        .map(|i| ImageSource::new(format!("/photos/img_{i:05}.png")))
        .collect()
}

fn open_gallery(count: usize) -> State {
    let mut state = State::new(sources(count), gallery::Settings::default());
    state.handle(Message::OpenPreview(0));
    state
}

/// Benchmark translation of raw iced events.
fn bench_from_iced_event(c: &mut Criterion) {
    let mut group = c.benchmark_group("gesture_dispatch");

    let events = [
        Event::Mouse(mouse::Event::WheelScrolled {
            delta: ScrollDelta::Pixels { x: 0.0, y: -240.0 },
        }),
        Event::Mouse(mouse::Event::CursorMoved {
            position: Point::new(120.0, 80.0),
        }),
        Event::Mouse(mouse::Event::ButtonPressed(mouse::Button::Left)),
        Event::Mouse(mouse::Event::ButtonReleased(mouse::Button::Right)),
    ];

    group.bench_function("from_iced_event", |b| {
        b.iter(|| {
            for event in &events {
                black_box(GestureEvent::from_iced_event(black_box(event)));
            }
        });
    });

    group.finish();
}

/// Benchmark a zoom followed by a long drag.
fn bench_drag_burst(c: &mut Criterion) {
    let mut group = c.benchmark_group("gesture_dispatch");

    group.bench_function("zoom_and_drag_100_moves", |b| {
        b.iter(|| {
            let mut state = open_gallery(3);
            state.handle(Message::Gesture(GestureEvent::Wheel(1.0)));
            state.handle(Message::Gesture(GestureEvent::PointerMoved(Point::ORIGIN)));
            state.handle(Message::Gesture(GestureEvent::PointerPressed));
            for i in 0..100 {
                let p = Point::new(i as f32, (i / 2) as f32);
                state.handle(Message::Gesture(GestureEvent::PointerMoved(p)));
            }
            state.handle(Message::Gesture(GestureEvent::PointerReleased));
            black_box(state.transform());
        });
    });

    group.finish();
}

/// Benchmark replacing a large list where most sources survive.
fn bench_set_images(c: &mut Criterion) {
    let mut group = c.benchmark_group("gesture_dispatch");

    let mut replacement = sources(1_000);
    replacement.rotate_left(10);
    replacement.truncate(990);

    group.bench_function("set_images_1000", |b| {
        b.iter(|| {
            let mut state = open_gallery(1_000);
            black_box(state.handle(Message::SetImages(replacement.clone())));
        });
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_from_iced_event,
    bench_drag_burst,
    bench_set_images
);
criterion_main!(benches);
