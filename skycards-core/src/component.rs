//! Component trait for view pieces that render from props

use ratatui::{layout::Rect, Frame};

use crate::event::EventKind;

/// A view piece that renders from read-only props and answers input with
/// actions.
///
/// Components never mutate application state. Cursor position and similar
/// purely visual details may live in `&mut self`; anything that changes what
/// the dashboard tracks goes out as an action.
///
/// # Example
///
/// ```ignore
/// struct RefreshHint;
///
/// impl Component<Action> for RefreshHint {
///     type Props<'a> = bool;
///
///     fn handle_event(&mut self, event: &EventKind, focused: bool) -> impl IntoIterator<Item = Action> {
///         match event {
///             EventKind::Key(key) if focused && key.code == KeyCode::Char('r') => {
///                 Some(Action::WeatherRefreshAll)
///             }
///             _ => None,
///         }
///     }
///
///     fn render(&mut self, frame: &mut Frame, area: Rect, _focused: bool) {
///         frame.render_widget(Paragraph::new("r refresh"), area);
///     }
/// }
/// ```
pub trait Component<A> {
    /// Data required to render the component
    type Props<'a>;

    /// Map an input event to actions.
    ///
    /// Default: render-only component, no actions.
    #[allow(unused_variables)]
    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = A> {
        None::<A>
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>);
}
