//! # Banner CLI
//!
//! Developer harness around the banner pipeline: load a scene, optionally
//! replay recorded input events through the interaction controller, render
//! one frame and write it as PNG.
//!
//! ## Usage
//!
//! ```bash
//! cargo run -p banner-cli -- --scene scene.json --output banner.png
//! ```
//!
//! ## With images and a template:
//!
//! ```bash
//! cargo run -p banner-cli -- --background bg.jpg --face me.png \
//!     --template corporate --profession software-developer --grid
//! ```

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]

use std::path::{Path, PathBuf};

use anyhow::Context;
use banner_core::{CanvasState, InputEvent, Profession, Scene, Template, ViewportConfig};
use banner_renderer::{ImageStore, Renderer, RendererConfig};
use clap::Parser;

/// Command-line arguments for banner-render.
#[derive(Debug, Clone, Parser)]
#[command(name = "banner-render")]
#[command(about = "Render a banner scene to PNG")]
#[command(version)]
pub struct CliArgs {
    /// Scene JSON file; an empty scene is used when omitted
    #[arg(long, env = "BANNER_SCENE")]
    pub scene: Option<PathBuf>,

    /// Output PNG path
    #[arg(short, long, env = "BANNER_OUTPUT", default_value = "banner.png")]
    pub output: PathBuf,

    /// Also write the composed SVG frame document here
    #[arg(long)]
    pub svg: Option<PathBuf>,

    /// JSON array of input events replayed before rendering
    #[arg(long)]
    pub events: Option<PathBuf>,

    /// Output pixels per canvas unit
    #[arg(long, default_value = "1.0")]
    pub scale: f32,

    /// Viewport zoom percent used to map replayed pointer events
    #[arg(long, default_value = "100")]
    pub zoom: f32,

    /// Draw the grid overlay
    #[arg(long)]
    pub grid: bool,

    /// Snap replayed drags to the grid
    #[arg(long)]
    pub snap: bool,

    /// Overlay opacity over the background photo (0..=1)
    #[arg(long)]
    pub overlay_opacity: Option<f32>,

    /// Background photo
    #[arg(long, env = "BANNER_BACKGROUND")]
    pub background: Option<PathBuf>,

    /// Face cutout image
    #[arg(long, env = "BANNER_FACE")]
    pub face: Option<PathBuf>,

    /// Logo image
    #[arg(long, env = "BANNER_LOGO")]
    pub logo: Option<PathBuf>,

    /// Built-in template id (corporate, personal-brand, minimalist, showcase, bold)
    #[arg(long)]
    pub template: Option<String>,

    /// Built-in profession id, or `blank`
    #[arg(long)]
    pub profession: Option<String>,

    /// Skip loading system fonts (text draws no glyphs)
    #[arg(long)]
    pub no_system_fonts: bool,
}

/// Everything one render run needs, resolved from the arguments.
pub struct RenderJob {
    /// Editor state holding the scene and viewport.
    pub state: CanvasState,
    /// Loaded images keyed by path.
    pub images: ImageStore,
    /// Renderer configuration.
    pub config: RendererConfig,
    /// Events to replay before rendering.
    pub events: Vec<InputEvent>,
}

impl RenderJob {
    /// Resolve a job from parsed arguments.
    ///
    /// Unreadable or undecodable images are logged and drawn as absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the scene or events file cannot be read or
    /// parsed, or if a template or profession id is unknown.
    pub fn from_args(args: &CliArgs) -> anyhow::Result<Self> {
        let mut scene = match &args.scene {
            Some(path) => load_scene(path)?,
            None => Scene::new(),
        };
        let mut images = ImageStore::new();

        if let Some(path) = &args.background {
            scene.backdrop.background = Some(load_image(&mut images, path));
        }
        if let Some(path) = &args.face {
            scene.face.image = Some(load_image(&mut images, path));
        }
        if let Some(path) = &args.logo {
            scene.backdrop.logo = Some(load_image(&mut images, path));
        }
        if let Some(opacity) = args.overlay_opacity {
            scene.backdrop.overlay_opacity = opacity;
        }
        if let Some(id) = &args.template {
            let template = Template::by_id(id)
                .ok_or_else(|| anyhow::anyhow!("Unknown template: {id}"))?;
            scene.backdrop.template = Some(template);
        }
        if let Some(id) = &args.profession {
            let profession = Profession::by_id(id)
                .ok_or_else(|| anyhow::anyhow!("Unknown profession: {id}"))?;
            scene.backdrop.profession = Some(profession);
        }

        let mut viewport = ViewportConfig {
            show_grid: args.grid,
            snap_to_grid: args.snap,
            ..ViewportConfig::default()
        };
        viewport.set_zoom(args.zoom);

        let events = match &args.events {
            Some(path) => load_events(path)?,
            None => Vec::new(),
        };

        let mut state = CanvasState::new(scene);
        state.viewport = viewport;

        Ok(Self {
            state,
            images,
            config: RendererConfig {
                scale: args.scale,
                load_system_fonts: !args.no_system_fonts,
                ..RendererConfig::default()
            },
            events,
        })
    }

    /// Replay the recorded events. Face bounds are refreshed from a
    /// composed frame after every change so face drags resolve.
    ///
    /// Returns the number of events that changed the scene.
    pub fn replay(&mut self, renderer: &Renderer) -> usize {
        let refresh = |state: &mut CanvasState, images: &ImageStore| {
            let frame = renderer.compose(&state.scene, &state.viewport, images);
            state.set_face_bounds(frame.face_bounds);
        };

        refresh(&mut self.state, &self.images);
        let mut changed = 0;
        for event in &self.events {
            let outcome = self.state.process_event(event);
            if outcome.changed {
                changed += 1;
                refresh(&mut self.state, &self.images);
            }
        }
        tracing::debug!("Replayed {} events, {changed} changed the scene", self.events.len());
        changed
    }
}

/// Run the CLI: resolve the job, replay events, render and write output.
///
/// # Errors
///
/// Returns an error if inputs cannot be loaded, the frame cannot be
/// rendered, or outputs cannot be written.
pub fn run(args: &CliArgs) -> anyhow::Result<()> {
    let mut job = RenderJob::from_args(args)?;
    let mut renderer = Renderer::new(job.config.clone());

    if !job.events.is_empty() {
        job.replay(&renderer);
    }

    let frame = renderer
        .render(&job.state.scene, &job.state.viewport, &job.images)
        .context("Failed to render frame")?;
    job.state.mark_rendered();

    let png = frame.encode_png().context("Failed to encode PNG")?;
    std::fs::write(&args.output, png)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;
    tracing::info!(
        "Wrote {}x{} frame to {} (layers: {:?})",
        frame.pixmap.width(),
        frame.pixmap.height(),
        args.output.display(),
        frame.layers
    );

    if let Some(path) = &args.svg {
        std::fs::write(path, &frame.svg)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        tracing::info!("Wrote frame document to {}", path.display());
    }

    Ok(())
}

fn load_scene(path: &Path) -> anyhow::Result<Scene> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read scene {}", path.display()))?;
    let scene = Scene::from_json(&json)
        .with_context(|| format!("Failed to parse scene {}", path.display()))?;
    tracing::info!(
        "Loaded scene with {} elements and {} badges",
        scene.element_count(),
        scene.badges().len()
    );
    Ok(scene)
}

fn load_events(path: &Path) -> anyhow::Result<Vec<InputEvent>> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read events {}", path.display()))?;
    serde_json::from_str(&json).with_context(|| format!("Failed to parse events {}", path.display()))
}

/// Load an image into the store and return its reference key.
fn load_image(images: &mut ImageStore, path: &Path) -> String {
    let key = path.display().to_string();
    match std::fs::read(path) {
        Ok(bytes) => {
            if let Ok((w, h)) = images.resolve_bytes(key.clone(), &bytes) {
                tracing::debug!("Loaded {key} ({w}x{h})");
            }
        }
        Err(e) => images.mark_failed(key.clone(), e.to_string()),
    }
    key
}
