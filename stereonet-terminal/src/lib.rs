/// Terminal stereonet viewer built on crossterm
use std::io::{stdout, Write};
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind},
    execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal,
};
use stereonet_core::{
    FeatureRef, Record, RenderAdapter, Representation, Stereonet, StereonetConfig,
};
use tracing::{info, warn};

pub mod renderer;

pub use renderer::CanvasRenderer;

/// Interactive stereonet in the terminal
pub struct TerminalApp {
    plot: Stereonet<CanvasRenderer>,
    focus: Option<FeatureRef>,
    running: bool,
    dirty: bool,
}

impl TerminalApp {
    /// Size the canvas to the terminal and plot the given records.
    pub fn new(records: &[Record], config: StereonetConfig) -> Result<Self> {
        let (width, height) = terminal::size()?;
        Self::with_canvas(CanvasRenderer::new(width as usize, height as usize), records, config)
    }

    pub fn with_canvas(
        canvas: CanvasRenderer,
        records: &[Record],
        config: StereonetConfig,
    ) -> Result<Self> {
        let mut plot = Stereonet::new(canvas, config)?;
        let summary = plot.load(records)?;
        info!(
            planes = summary.planes.len(),
            lines = summary.lines.len(),
            rejected = summary.rejected,
            "measurements loaded"
        );
        Ok(Self {
            plot,
            focus: None,
            running: true,
            dirty: true,
        })
    }

    pub fn plot(&self) -> &Stereonet<CanvasRenderer> {
        &self.plot
    }

    pub fn focus(&self) -> Option<FeatureRef> {
        self.focus
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn run(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        execute!(stdout(), terminal::EnterAlternateScreen, cursor::Hide)?;

        let result = self.main_loop();

        // Cleanup
        terminal::disable_raw_mode()?;
        execute!(stdout(), terminal::LeaveAlternateScreen, cursor::Show)?;

        result
    }

    fn main_loop(&mut self) -> Result<()> {
        while self.running {
            if self.dirty {
                self.render()?;
                self.dirty = false;
            }
            if event::poll(Duration::from_millis(100))? {
                let event = event::read()?;
                self.handle_event(event)?;
            }
        }
        Ok(())
    }

    /// Apply one terminal event to the plot.
    pub fn handle_event(&mut self, event: Event) -> Result<()> {
        match event {
            Event::Key(KeyEvent { code, kind, .. }) if kind != KeyEventKind::Release => {
                self.handle_key(code)?;
            }
            Event::Resize(width, height) => {
                self.set_focus(None);
                self.plot
                    .adapter_mut()
                    .set_viewport(width as usize, height as usize);
                match self.plot.adapter().surface_size() {
                    Some(size) => self.plot.resize(size)?,
                    None => {
                        // Primitives were laid out for the old size
                        self.plot.adapter_mut().clear();
                        warn!(width, height, "terminal too small to draw the plot");
                    }
                }
            }
            _ => return Ok(()),
        }
        self.dirty = true;
        Ok(())
    }

    fn handle_key(&mut self, code: KeyCode) -> Result<()> {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.running = false;
            }
            KeyCode::Char('p') => {
                let next = match self.plot.representation() {
                    Representation::Arc => Representation::Pole,
                    Representation::Pole => Representation::Arc,
                };
                // Switching replaces plane primitives, so drop focus first
                self.set_focus(None);
                self.plot.set_representation(next)?;
            }
            KeyCode::Char('g') => {
                let visible = !self.plot.graticule_visible();
                self.plot.set_graticule_visible(visible)?;
            }
            KeyCode::Tab => {
                let next = self.next_focus();
                self.set_focus(next);
            }
            KeyCode::Char('x') => {
                if let Some(feature) = self.focus {
                    self.set_focus(None);
                    match feature {
                        FeatureRef::Plane(id) => self.plot.remove_plane(id),
                        FeatureRef::Line(id) => self.plot.remove_line(id),
                    }
                }
            }
            _ => {}
        }
        Ok(())
    }

    /// Feature after the current focus, planes first, wrapping around.
    fn next_focus(&self) -> Option<FeatureRef> {
        let features: Vec<FeatureRef> = self
            .plot
            .planes()
            .into_iter()
            .map(|(id, _)| FeatureRef::Plane(id))
            .chain(
                self.plot
                    .lines()
                    .into_iter()
                    .map(|(id, _)| FeatureRef::Line(id)),
            )
            .collect();
        let position = self
            .focus
            .and_then(|current| features.iter().position(|f| *f == current));
        match position {
            Some(i) => features.get(i + 1).or(features.first()).copied(),
            None => features.first().copied(),
        }
    }

    fn handle_of(&self, feature: FeatureRef) -> Option<u64> {
        match feature {
            FeatureRef::Plane(id) => self.plot.plane(id).and_then(|p| p.handle),
            FeatureRef::Line(id) => self.plot.line(id).and_then(|l| l.handle),
        }
    }

    fn set_focus(&mut self, feature: Option<FeatureRef>) {
        if let Some(handle) = self.focus.and_then(|f| self.handle_of(f)) {
            self.plot.adapter_mut().on_hover_end(&handle);
        }
        self.focus = feature;
        if let Some(handle) = feature.and_then(|f| self.handle_of(f)) {
            let canvas = self.plot.adapter_mut();
            if let Some(binding) = canvas.binding(handle).cloned() {
                canvas.on_hover(&handle, &binding);
            }
        }
    }

    /// Write the current plot as plain text, without terminal control codes.
    pub fn snapshot<W: Write>(&mut self, writer: &mut W) -> Result<()> {
        let canvas = self.plot.adapter_mut();
        canvas.rasterize();
        writeln!(writer, "{}", canvas.to_text())?;
        Ok(())
    }

    fn render(&mut self) -> Result<()> {
        let canvas = self.plot.adapter_mut();
        canvas.rasterize();

        let mut stdout = stdout();
        queue!(stdout, cursor::MoveTo(0, 0))?;
        canvas.draw(&mut stdout)?;

        let tooltip = canvas.tooltip().unwrap_or_default().to_string();
        queue!(
            stdout,
            cursor::MoveTo(0, 0),
            SetForegroundColor(Color::Yellow),
            Print(format!(
                "Stereonet | {} planes, {} lines | {} | {} | P=Pole/Arc G=Grid Tab=Select X=Remove Q=Quit",
                self.plot.plane_count(),
                self.plot.line_count(),
                self.plot.representation(),
                tooltip,
            )),
            ResetColor
        )?;

        stdout.flush()?;
        Ok(())
    }
}
