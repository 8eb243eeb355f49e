//! ui-cues - interface sound cue demo
//!
//! A small window for auditioning the cues. Every button plays its cue on
//! press and the hover cue when the pointer enters it, the way a form would
//! wire them up.

use std::time::{Duration, Instant};

use eframe::egui;

use ui_cues::{
    ContextManager, CpalContext, CueDispatcher, CueKind, CueSettings, MonitorBuffer, MuteState,
};

mod render;

use render::WaveformView;

/// How long the simulated request "loads" before reporting success
const SIMULATED_REQUEST: Duration = Duration::from_millis(600);

fn main() -> eframe::Result<()> {
    env_logger::init();
    log::info!("Starting ui-cues");

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([560.0, 380.0])
            .with_title("ui-cues"),
        ..Default::default()
    };

    eframe::run_native(
        "ui-cues",
        options,
        Box::new(|cc| Ok(Box::new(CueDemoApp::new(cc)))),
    )
}

struct CueDemoApp {
    cues: CueDispatcher<CpalContext>,
    mute: MuteState,
    settings: CueSettings,
    monitor: MonitorBuffer,
    waveform: WaveformView,

    /// Button under the pointer last frame, for hover-enter detection
    hovered: Option<egui::Id>,

    /// Outcome cue of the simulated request, and when to play it
    pending_result: Option<(Instant, CueKind)>,
}

impl CueDemoApp {
    fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        let settings = CueSettings::load();
        let monitor = MonitorBuffer::new(settings.monitor_capacity);

        // The context is only opened on the first audible cue
        let factory_settings = settings.clone();
        let factory_monitor = monitor.clone();
        let cues = CueDispatcher::new(ContextManager::new(move || {
            CpalContext::open(&factory_settings, factory_monitor.clone())
        }));

        Self {
            cues,
            mute: MuteState::new(settings.start_muted),
            settings,
            monitor,
            waveform: WaveformView::default(),
            hovered: None,
            pending_result: None,
        }
    }

    fn play(&mut self, kind: CueKind) {
        self.cues.play_cue(kind, self.mute);
    }

    fn status_text(&self) -> String {
        let device = match self.cues.contexts().get() {
            Some(ctx) => format!("{} @ {} Hz", ctx.device_name(), ctx.sample_rate()),
            None => "Audio idle".to_string(),
        };
        match self.cues.failed_cues() {
            0 => device,
            n => format!("{} | {} cue(s) skipped", device, n),
        }
    }
}

impl eframe::App for CueDemoApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        ctx.request_repaint_after(Duration::from_millis(16));

        if let Some((due, kind)) = self.pending_result {
            if Instant::now() >= due {
                self.pending_result = None;
                self.play(kind);
            }
        }

        if let Some(audio) = self.cues.contexts().get() {
            audio.set_master_volume(self.settings.master_volume);
        }

        // Top panel
        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading("ui-cues");
                ui.separator();

                let mute_text = if self.mute.is_muted() {
                    "🔇 Muted"
                } else {
                    "🔊 Sound on"
                };
                if ui.button(mute_text).clicked() {
                    self.mute.toggle();
                    self.play(CueKind::Click);
                }

                ui.separator();
                ui.add(
                    egui::Slider::new(&mut self.settings.master_volume, 0.0..=1.0)
                        .text("Volume"),
                );
            });
        });

        egui::TopBottomPanel::bottom("status_panel").show(ctx, |ui| {
            ui.small(self.status_text());
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            let mut hovered_now = None;

            ui.label("Cues:");
            ui.horizontal(|ui| {
                for kind in CueKind::ALL {
                    let response = ui.button(kind.name());
                    if response.hovered() {
                        hovered_now = Some(response.id);
                    }
                    if response.clicked() {
                        self.play(*kind);
                    }
                }
            });

            ui.add_space(8.0);
            let response = ui.button("Simulate conversion");
            if response.hovered() {
                hovered_now = Some(response.id);
            }
            if response.clicked() && self.pending_result.is_none() {
                self.play(CueKind::Loading);
                let due = Instant::now() + SIMULATED_REQUEST;
                self.pending_result = Some((due, CueKind::Success));
            }

            if hovered_now.is_some() && hovered_now != self.hovered {
                self.play(CueKind::Hover);
            }
            self.hovered = hovered_now;

            ui.add_space(12.0);
            let samples = self.monitor.snapshot();
            self.waveform.show(ui, &samples, 120.0);
            ui.small(format!("Peak: {:.3}", self.monitor.peak()));
        });
    }
}

impl Drop for CueDemoApp {
    fn drop(&mut self) {
        self.cues.release();
        self.settings.save();
    }
}
