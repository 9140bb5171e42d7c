// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! A `winit` window with a current `glutin` OpenGL context.

use anyhow::{anyhow, Context as _};
use glutin::{
    config::{ConfigTemplateBuilder, GlConfig},
    context::{
        ContextApi, ContextAttributesBuilder, GlProfile, NotCurrentGlContext,
        PossiblyCurrentContext, Version,
    },
    display::{GetGlDisplay, GlDisplay},
    surface::{GlSurface, Surface, SwapInterval, WindowSurface},
};
use glutin_winit::{DisplayBuilder, GlWindow as _};
use raw_window_handle::HasWindowHandle;
use std::num::NonZeroU32;
use winit::{dpi::PhysicalSize, event_loop::ActiveEventLoop, window::Window};

/// A window whose default framebuffer is the benchmark's drawing surface.
///
/// Owns the GL context and surface; dropping it destroys both. The context
/// stays current on the thread that built the window.
pub struct GlWindow {
    // Field order is drop order: the context and surface go before the window.
    context: PossiblyCurrentContext,
    surface: Surface<WindowSurface>,
    window: Window,
}

/// A builder for creating [`GlWindow`] instances.
pub struct GlWindowBuilder {
    title: String,
    width: u32,
    height: u32,
    vsync: bool,
}

impl GlWindowBuilder {
    /// Creates a new `GlWindowBuilder` with default settings.
    pub fn new() -> Self {
        Self {
            title: "Statebench".to_string(),
            width: 1980,
            height: 1080,
            vsync: true,
        }
    }

    /// Sets the title of the window to be built.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Sets the physical inner size of the window, which is also the viewport.
    pub fn with_dimensions(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Whether presenting waits for vertical blank.
    pub fn with_vsync(mut self, vsync: bool) -> Self {
        self.vsync = vsync;
        self
    }

    /// Builds the window, creates an OpenGL context for it and makes it current.
    ///
    /// Tries an OpenGL 3.3 compatibility context first and falls back to
    /// OpenGL ES 2.0.
    ///
    /// ## Returns
    /// The window, and a `glow` context loaded from it.
    ///
    /// ## Errors
    /// Returns an error if no suitable GL configuration, context or surface
    /// can be created.
    pub fn build(self, event_loop: &ActiveEventLoop) -> anyhow::Result<(GlWindow, glow::Context)> {
        log::info!(
            "Building GL window with title: '{}' and size: {}x{}",
            self.title,
            self.width,
            self.height
        );

        let window_attributes = Window::default_attributes()
            .with_title(self.title)
            .with_inner_size(PhysicalSize::new(self.width, self.height))
            .with_resizable(false)
            .with_visible(true);

        let template = ConfigTemplateBuilder::new().with_alpha_size(8);
        let (window, gl_config) = DisplayBuilder::new()
            .with_window_attributes(Some(window_attributes))
            .build(event_loop, template, |configs| {
                fewest_samples(configs, |config| config.num_samples())
                    // glutin reports an error before calling the picker when no config matches.
                    .expect("glutin passed an empty config list to the picker")
            })
            .map_err(|err| anyhow!("Failed to create GL display: {err}"))?;
        let window = window.ok_or_else(|| anyhow!("GL display was created without a window"))?;

        let raw_window_handle = window
            .window_handle()
            .context("Window has no raw handle")?
            .as_raw();
        let gl_display = gl_config.display();

        let desktop_attributes = ContextAttributesBuilder::new()
            .with_profile(GlProfile::Compatibility)
            .with_context_api(ContextApi::OpenGl(Some(Version::new(3, 3))))
            .build(Some(raw_window_handle));
        let es_attributes = ContextAttributesBuilder::new()
            .with_context_api(ContextApi::Gles(Some(Version::new(2, 0))))
            .build(Some(raw_window_handle));

        // SAFETY: the raw window handle belongs to `window`, which outlives the context.
        let not_current = unsafe {
            gl_display
                .create_context(&gl_config, &desktop_attributes)
                .or_else(|err| {
                    log::warn!("OpenGL 3.3 context unavailable ({err}), trying OpenGL ES 2.0");
                    gl_display.create_context(&gl_config, &es_attributes)
                })
        }
        .context("Failed to create a GL context")?;

        let surface_attributes = window
            .build_surface_attributes(Default::default())
            .context("Failed to describe the window surface")?;
        // SAFETY: the surface is created for `window`, which is stored alongside it.
        let surface = unsafe { gl_display.create_window_surface(&gl_config, &surface_attributes) }
            .context("Failed to create the window surface")?;
        let context = not_current
            .make_current(&surface)
            .context("Failed to make the GL context current")?;

        let interval = if self.vsync {
            SwapInterval::Wait(NonZeroU32::MIN)
        } else {
            SwapInterval::DontWait
        };
        if let Err(err) = surface.set_swap_interval(&context, interval) {
            log::warn!("Failed to set swap interval {interval:?}: {err}");
        }

        // SAFETY: the context is current on this thread.
        let gl = unsafe {
            glow::Context::from_loader_function_cstr(|symbol| gl_display.get_proc_address(symbol))
        };

        log::info!("GL window created successfully (id: {:?}).", window.id());
        Ok((
            GlWindow {
                context,
                surface,
                window,
            },
            gl,
        ))
    }
}

/// Picks the first config with the fewest multisampling samples.
///
/// Multisampling would add a per-pixel cost that is the same for every
/// policy, so the cheapest config is preferred.
fn fewest_samples<C>(configs: impl Iterator<Item = C>, samples: impl Fn(&C) -> u8) -> Option<C> {
    configs.reduce(|best, config| {
        if samples(&config) < samples(&best) {
            config
        } else {
            best
        }
    })
}

impl Default for GlWindowBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl GlWindow {
    /// Returns the physical dimensions (width, height) of the window's inner area.
    pub fn inner_size(&self) -> (u32, u32) {
        let size = self.window.inner_size();
        (size.width, size.height)
    }

    /// Swaps the back buffer to the screen.
    pub fn present(&self) -> anyhow::Result<()> {
        self.surface
            .swap_buffers(&self.context)
            .context("Failed to swap buffers")
    }

    /// The underlying `winit` window.
    pub fn window(&self) -> &Window {
        &self.window
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn picks_the_first_config_with_the_fewest_samples() {
        let configs = [("msaa4", 4), ("plain", 0), ("msaa2", 2), ("plain-too", 0)];
        let picked = fewest_samples(configs.into_iter(), |&(_, samples)| samples);
        assert_eq!(picked, Some(("plain", 0)));
    }

    #[test]
    fn empty_config_list_picks_nothing() {
        let picked = fewest_samples(std::iter::empty::<u8>(), |&samples| samples);
        assert_eq!(picked, None);
    }

    #[test]
    fn builder_defaults() {
        let builder = GlWindowBuilder::default()
            .with_dimensions(640, 480)
            .with_vsync(false);
        assert_eq!(builder.title, "Statebench");
        assert_eq!((builder.width, builder.height), (640, 480));
        assert!(!builder.vsync);
    }
}
