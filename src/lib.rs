//! # ctrl-tree
//!
//! A retained-mode control tree for native windows: CSS-like styling, dock
//! layout, hover/capture pointer routing and a mouse-gesture overlay.
//!
//! The tree never touches a window system directly. The embedding application
//! implements [`Host`] (repaint, capture, timers, clock), [`Target`]
//! (commands, slider values, gestures) and [`Surface`] (drawing), feeds raw
//! [`InputEvent`]s into [`Ui::handle`] and calls [`Ui::paint`] when the
//! window needs repainting.
//!
//! ## Core Systems
//!
//! - **[`css`]**: style tokenizer, declaration parser, typed style record
//! - **[`dom`]**: slotmap-backed node arena with tree operations and hit-testing
//! - **[`layout`]**: dock layout with `fill`/`auto`/fixed sizes and `auto` margins
//! - **[`widget`]**: the [`Control`] trait and its callback contexts
//! - **[`widgets`]**: built-in controls: Panel, Button, Slider, GestureOverlay
//! - **[`event`]**: raw input, hover/capture routing, per-node timers
//! - **[`render`]**: the drawing surface and the back-to-front painter
//! - **[`ui`]**: the window-level tree tying everything together
//! - **[`testing`]**: headless Pilot, recording host/target/surface, snapshots
//!
//! ## Example
//!
//! ```ignore
//! use ctrl_tree::prelude::*;
//!
//! let mut ui = Ui::new(UiConfig::new().with_gesture(true), host, target)?;
//! let ok = ui.create_styled(1, Button::new("OK"), "width:80;height:24;margin:0 auto")?;
//! ui.insert_child(ui.root(), ok)?;
//! ui.layout(Rect::new(0, 0, 640, 480));
//! ui.handle(InputEvent::PointerMove { pt: Point::new(10, 10), keys: KeyState::NONE });
//! ```

// Foundation
pub mod geometry;
pub mod host;

// Core systems
pub mod css;
pub mod dom;
pub mod layout;

// Control system
pub mod widget;
pub mod widgets;

// Events and rendering
pub mod event;
pub mod render;

// Window
pub mod ui;

// Headless test harness
pub mod testing;

pub use css::{Style, StyleChange, StyleError};
pub use dom::{NodeKey, TreeError};
pub use event::{InputEvent, KeyState, MouseButton};
pub use geometry::{Point, Rect};
pub use host::{Host, NullTarget, Target, TimerToken};
pub use render::Surface;
pub use ui::{Ui, UiConfig, UiError};
pub use widget::Control;

/// Commonly used types in one import.
pub mod prelude {
    pub use crate::css::{Color, Style, StyleChange};
    pub use crate::dom::NodeKey;
    pub use crate::event::{InputEvent, KeyState, MouseButton};
    pub use crate::geometry::{Point, Rect};
    pub use crate::host::{Host, Target, TimerToken};
    pub use crate::render::{HAlign, Surface, TextStyle, VAlign};
    pub use crate::ui::{Ui, UiConfig, UiError};
    pub use crate::widget::{Control, EventCtx, PaintCtx};
    pub use crate::widgets::{Button, GestureOverlay, Panel, Slider};
}
