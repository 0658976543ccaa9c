use crate::backend::GraphicsBackend;
use crate::context::RenderContext;

/// Something the loop can draw once per frame.
///
/// Failures inside a scene are the scene's own concern; nothing is reported
/// back to the loop.
pub trait Scene<B: GraphicsBackend> {
    fn render(&mut self, ctx: &mut RenderContext<B>);
}

impl<B, F> Scene<B> for F
where
    B: GraphicsBackend,
    F: FnMut(&mut RenderContext<B>),
{
    fn render(&mut self, ctx: &mut RenderContext<B>) {
        self(ctx)
    }
}

/// A scene that draws nothing. The frame is still cleared and presented.
#[derive(Debug, Default, Clone, Copy)]
pub struct EmptyScene;

impl<B: GraphicsBackend> Scene<B> for EmptyScene {
    fn render(&mut self, _ctx: &mut RenderContext<B>) {}
}
