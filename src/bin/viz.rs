use eframe::egui;
use egui_plot::{Line, Plot, PlotPoints, Points};
use tracing_subscriber::EnvFilter;

use ramjet_sim::config::Scenario;
use ramjet_sim::physics::{AeroDatabase, AeroModel};
use ramjet_sim::sim::{self, SimOutcome, TrajectorySample};

fn main() -> eframe::Result {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let scenario = Scenario::default();
    let (outcome, aero) = sim::run(&scenario);

    let app = SimViz { scenario, outcome, aero };
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([1200.0, 800.0]),
        ..Default::default()
    };
    eframe::run_native("Guided Trajectory", options, Box::new(|_| Ok(Box::new(app))))
}

struct SimViz {
    scenario: Scenario,
    outcome: SimOutcome,
    aero: AeroDatabase,
}

impl eframe::App for SimViz {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let samples = self.outcome.trajectory.as_slice();
        let step = (samples.len() / 2000).max(1);
        let sampled: Vec<&TrajectorySample> = samples.iter().step_by(step).collect();
        let target = self.scenario.target.position;

        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            ui.heading(format!(
                "Guided Trajectory: {} (Cd={:.2})",
                self.scenario.vehicle.name,
                self.aero.cd(2.0)
            ));
            ui.label(format!(
                "{}  |  Flight: {:.2} s  |  Steps: {}",
                if self.outcome.termination.is_impact() { "Impact" } else { "Timeout" },
                self.outcome.termination.time(),
                self.outcome.steps,
            ));
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            let available = ui.available_size();
            let width = available.x - 8.0;
            let half_h = available.y / 2.0 - 16.0;

            // Altitude vs Downrange
            ui.label("Trajectory (m)");
            let points: PlotPoints = sampled.iter().map(|s| [s.downrange, s.altitude]).collect();
            Plot::new("trajectory")
                .width(width)
                .height(half_h)
                .x_axis_label("Downrange (m)")
                .y_axis_label("Altitude (m)")
                .legend(egui_plot::Legend::default())
                .show(ui, |plot_ui| {
                    plot_ui.line(Line::new("Trajectory", points));
                    plot_ui.points(
                        Points::new("Target", vec![[target.x, target.y]])
                            .radius(6.0)
                            .shape(egui_plot::MarkerShape::Cross),
                    );
                });

            // Mach vs Downrange
            ui.label("Mach Number Profile");
            let points: PlotPoints = sampled.iter().map(|s| [s.downrange, s.mach]).collect();
            Plot::new("mach")
                .width(width)
                .height(half_h)
                .x_axis_label("Downrange (m)")
                .y_axis_label("Mach")
                .show(ui, |plot_ui| {
                    plot_ui.line(Line::new("Mach", points));
                });
        });
    }
}
