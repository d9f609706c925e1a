//! Windowed sphere viewer driven by a procedural test-pattern decoder.
//! Drag with the left mouse button to look around; space toggles playback.
//! Pass an .srt path as the first argument to see subtitles in the title bar.
//! Run: cargo run -p debug --bin sphere_window [-- subtitles.srt]

use std::time::{Duration, Instant};

use media_api::{MediaDecoder, VideoFrame};
use pano_bridge::{Controls, PanoWindowBackend};
use pano_renderer::PanoConfig;
use raw_window_handle::{HasDisplayHandle, HasWindowHandle};
use subtitles::{format_mm_ss, SubtitleTrack};
use winit::application::ApplicationHandler;
use winit::event::{ElementState, MouseButton, WindowEvent};
use winit::event_loop::ActiveEventLoop;
use winit::keyboard::{Key, NamedKey};
use winit::window::WindowId;

/// Stand-in for a real video decoder: a scrolling equirectangular gradient
/// with a bright meridian stripe, so orientation and playback progress are
/// both visible.
struct TestPatternDecoder {
    width: u32,
    height: u32,
    data: Vec<u8>,
    playing: bool,
    looping: bool,
    position_ms: u32,
    duration_ms: u32,
    last_tick: Instant,
}

impl TestPatternDecoder {
    fn new(width: u32, height: u32, duration_ms: u32) -> Self {
        Self {
            width,
            height,
            data: vec![0; (width * height * 4) as usize],
            playing: false,
            looping: false,
            position_ms: 0,
            duration_ms,
            last_tick: Instant::now(),
        }
    }

    fn advance_clock(&mut self) {
        let now = Instant::now();
        let elapsed = now.duration_since(self.last_tick).as_millis() as u32;
        self.last_tick = now;
        if !self.playing {
            return;
        }
        let next = self.position_ms + elapsed;
        self.position_ms = if next > self.duration_ms {
            if self.looping {
                next % self.duration_ms.max(1)
            } else {
                self.playing = false;
                self.duration_ms
            }
        } else {
            next
        };
    }

    fn paint(&mut self) {
        let progress = self.position_ms as f32 / self.duration_ms.max(1) as f32;
        let stripe = (progress * self.width as f32) as u32 % self.width;
        for y in 0..self.height {
            let ny = y as f32 / self.height as f32;
            for x in 0..self.width {
                let nx = x as f32 / self.width as f32;
                let i = ((y * self.width + x) * 4) as usize;
                let near_stripe = x.abs_diff(stripe) < self.width / 100 + 1;
                self.data[i] = if near_stripe { 255 } else { (nx * 255.0) as u8 };
                self.data[i + 1] = if near_stripe { 255 } else { (ny * 255.0) as u8 };
                self.data[i + 2] = if near_stripe { 64 } else { 160 };
                self.data[i + 3] = 255;
            }
        }
    }
}

impl MediaDecoder for TestPatternDecoder {
    fn start(&mut self) {
        self.last_tick = Instant::now();
        self.playing = true;
    }
    fn pause(&mut self) {
        self.playing = false;
    }
    fn is_playing(&self) -> bool {
        self.playing
    }
    fn seek(&mut self, position_ms: u32) {
        self.position_ms = position_ms.min(self.duration_ms);
    }
    fn position_ms(&self) -> u32 {
        self.position_ms
    }
    fn duration_ms(&self) -> u32 {
        self.duration_ms
    }
    fn set_looping(&mut self, looping: bool) {
        self.looping = looping;
    }
    fn frame_size(&self) -> (u32, u32) {
        (self.width, self.height)
    }
    fn next_frame(&mut self) -> Option<VideoFrame<'_>> {
        self.advance_clock();
        self.paint();
        Some(VideoFrame {
            width: self.width,
            height: self.height,
            data: &self.data,
        })
    }
}

struct App {
    window: Option<winit::window::Window>,
    backend: Option<PanoWindowBackend>,
    controls: Option<Controls>,
    track: SubtitleTrack,
    size: (u32, u32),
    dragging: bool,
    last_cursor: Option<(f64, f64)>,
    playing: bool,
    last_poll: Instant,
}

impl App {
    fn new(track: SubtitleTrack) -> Self {
        Self {
            window: None,
            backend: None,
            controls: None,
            track,
            size: (1280, 720),
            dragging: false,
            last_cursor: None,
            playing: true,
            last_poll: Instant::now(),
        }
    }

    /// The 100 ms UI poll: progress, orientation and active subtitle go to
    /// the window title (a stand-in for on-screen widgets).
    fn poll_widgets(&mut self) {
        if self.last_poll.elapsed() < Duration::from_millis(100) {
            return;
        }
        self.last_poll = Instant::now();
        let (window, controls) = match (&self.window, &self.controls) {
            (Some(w), Some(c)) => (w, c),
            _ => return,
        };
        let (pos, dur) = controls.progress();
        let (yaw, pitch) = controls.orientation();
        let subtitle = self
            .track
            .active_at(pos)
            .map(|c| c.plain_text())
            .unwrap_or_default();
        window.set_title(&format!(
            "pano {} / {}  yaw {yaw:.0} pitch {pitch:.0}  {subtitle}",
            format_mm_ss(pos),
            format_mm_ss(dur),
        ));
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        let attrs = winit::window::WindowAttributes::default()
            .with_title("pano sphere (drag to look, space to pause)")
            .with_inner_size(winit::dpi::LogicalSize::new(1280, 720));
        let window = event_loop.create_window(attrs).expect("create window");
        let phys = window.inner_size();
        self.size = (phys.width, phys.height);
        self.window = Some(window);
        if let Some(ref w) = self.window {
            w.request_redraw();
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(physical) => {
                self.size = (physical.width.max(1), physical.height.max(1));
                if let Some(ref w) = self.window {
                    w.request_redraw();
                }
            }
            WindowEvent::MouseInput { state, button, .. } => {
                if button == MouseButton::Left {
                    self.dragging = state == ElementState::Pressed;
                    if !self.dragging {
                        self.last_cursor = None;
                    }
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                let current = (position.x, position.y);
                if self.dragging {
                    if let (Some((px, py)), Some(controls)) = (self.last_cursor, &self.controls) {
                        controls.pointer_delta(
                            (current.0 - px) as f32,
                            (current.1 - py) as f32,
                        );
                    }
                }
                self.last_cursor = Some(current);
            }
            WindowEvent::KeyboardInput { event, .. } => {
                if event.state == ElementState::Pressed
                    && event.logical_key == Key::Named(NamedKey::Space)
                {
                    if let Some(ref controls) = self.controls {
                        self.playing = !self.playing;
                        controls.set_playing(self.playing);
                    }
                }
            }
            WindowEvent::RedrawRequested => {
                let window = match &self.window {
                    Some(w) => w,
                    None => return,
                };
                self.size = {
                    let phys = window.inner_size();
                    (phys.width.max(1), phys.height.max(1))
                };
                if self.backend.is_none() {
                    match PanoWindowBackend::from_window(window, PanoConfig::default()) {
                        Ok(mut backend) => {
                            backend
                                .plugin_mut()
                                .attach_decoder(Box::new(TestPatternDecoder::new(1024, 512, 30_000)));
                            self.controls = Some(backend.plugin().controls());
                            self.backend = Some(backend);
                        }
                        Err(e) => {
                            eprintln!("PanoWindowBackend::from_window failed: {e}");
                            event_loop.exit();
                            return;
                        }
                    }
                }
                let (raw_window, raw_display) =
                    match (window.window_handle(), window.display_handle()) {
                        (Ok(wh), Ok(dh)) => (wh.as_raw(), dh.as_raw()),
                        _ => return,
                    };
                let backend = match &mut self.backend {
                    Some(b) => b,
                    None => return,
                };
                if let Err(e) = backend.render_frame_to_window(self.size, raw_window, raw_display) {
                    log::warn!("frame dropped: {e}");
                }
                self.poll_widgets();
                if let Some(ref w) = self.window {
                    w.request_redraw();
                }
            }
            _ => {}
        }
    }
}

fn main() -> Result<(), String> {
    env_logger::init();
    let track = match std::env::args().nth(1) {
        Some(path) => SubtitleTrack::load(&path)?,
        None => SubtitleTrack::default(),
    };
    let event_loop = winit::event_loop::EventLoop::new().map_err(|e| e.to_string())?;
    let mut app = App::new(track);
    event_loop.run_app(&mut app).map_err(|e| e.to_string())?;
    Ok(())
}
