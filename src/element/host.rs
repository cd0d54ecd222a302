use crate::{
    element::{
        context::CloudContext,
        props::VideoProps,
        reload::{ReloadController, should_reload},
        render::{Rendered, VideoElement, render_video},
    },
    foundation::error::CldResult,
};

/// Rendering collaborator that owns the actual media element.
///
/// Exactly one of the three methods is called per render of a [`VideoInstance`].
pub trait MediaHost {
    /// First render of the instance.
    fn mount(&mut self, element: &VideoElement) -> CldResult<()>;
    /// Asset identity changed; the element must be recreated and reloaded.
    fn reload(&mut self, element: &VideoElement) -> CldResult<()>;
    /// Only non-identity properties changed; patch the element in place.
    fn update(&mut self, element: &VideoElement) -> CldResult<()>;
}

/// What a [`VideoInstance`] asked its host to do.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HostAction {
    /// [`MediaHost::mount`].
    Mount,
    /// [`MediaHost::reload`].
    Reload,
    /// [`MediaHost::update`].
    Update,
}

/// One long-lived video element bound to a host.
#[derive(Debug)]
pub struct VideoInstance<H> {
    host: H,
    controller: ReloadController,
}

impl<H: MediaHost> VideoInstance<H> {
    /// Instance that has not rendered yet.
    pub fn new(host: H) -> Self {
        Self {
            host,
            controller: ReloadController::new(),
        }
    }

    /// Render `props`, decide whether the asset identity changed and notify the host.
    ///
    /// The new snapshot is recorded only once the host call succeeds. A failed resolution or a
    /// failed host call leaves the previous snapshot in place, so the same decision is taken
    /// again on the next render.
    pub fn render(&mut self, props: &VideoProps, ctx: &CloudContext) -> CldResult<HostAction> {
        let Rendered { element, snapshot } = render_video(props, ctx)?;
        let action = match self.controller.current() {
            None => HostAction::Mount,
            Some(prev) if should_reload(prev, &snapshot) => HostAction::Reload,
            Some(_) => HostAction::Update,
        };

        match action {
            HostAction::Mount => self.host.mount(&element)?,
            HostAction::Reload => self.host.reload(&element)?,
            HostAction::Update => self.host.update(&element)?,
        }
        self.controller.observe(snapshot);
        Ok(action)
    }

    /// Borrow the host.
    pub fn host(&self) -> &H {
        &self.host
    }

    /// Reload state of this instance.
    pub fn controller(&self) -> &ReloadController {
        &self.controller
    }

    /// Consume the instance and return its host.
    pub fn into_host(self) -> H {
        self.host
    }
}

/// In-memory host for tests and debugging.
#[derive(Debug, Default)]
pub struct RecordingHost {
    /// Every call in order.
    pub(crate) calls: Vec<(HostAction, VideoElement)>,
}

impl RecordingHost {
    /// Host with no recorded calls.
    pub fn new() -> Self {
        Self::default()
    }

    /// Borrow the recorded calls.
    pub fn calls(&self) -> &[(HostAction, VideoElement)] {
        &self.calls
    }

    /// Number of reloads requested so far.
    pub fn reload_count(&self) -> usize {
        self.calls
            .iter()
            .filter(|(action, _)| *action == HostAction::Reload)
            .count()
    }

    /// Most recently delivered element.
    pub fn last(&self) -> Option<&VideoElement> {
        self.calls.last().map(|(_, el)| el)
    }
}

impl MediaHost for RecordingHost {
    fn mount(&mut self, element: &VideoElement) -> CldResult<()> {
        self.calls.clear();
        self.calls.push((HostAction::Mount, element.clone()));
        Ok(())
    }

    fn reload(&mut self, element: &VideoElement) -> CldResult<()> {
        self.calls.push((HostAction::Reload, element.clone()));
        Ok(())
    }

    fn update(&mut self, element: &VideoElement) -> CldResult<()> {
        self.calls.push((HostAction::Update, element.clone()));
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/element/host.rs"]
mod tests;
