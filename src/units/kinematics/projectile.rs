//! Projectile motion
//!
//! The user enters a launch speed, then drags from the launch point to aim.
//! Releasing fires a projectile along the closed-form parabola; several may
//! be in flight at once. The latest shot's time of flight, range and maximum
//! height are shown on the right.

use egui::{Align2, Color32, FontId, Frame, Key, Pos2, RichText, Sense, Shape, Stroke};
use physlab_core::UnitError;
use physlab_math::{aim_angle, point_on_circle, Vec2};
use physlab_physics::{is_launch_angle, Flight, FlightConfig, Projectile};
use physlab_render::{FrameClock, Stage, StageControl, WindowSpec};
use rand::seq::SliceRandom;

use crate::config::KinematicsConfig;
use crate::input::{InputAction, InputMapper, KeyBindings};
use crate::units::Runtime;

const BACKGROUND: Color32 = Color32::from_rgb(18, 18, 18);
const FOREGROUND: Color32 = Color32::from_rgb(217, 217, 217);
const AQUA: Color32 = Color32::from_rgb(0, 249, 182);
const YELLOW: Color32 = Color32::from_rgb(254, 221, 0);

const COLORS: [Color32; 6] = [
    Color32::from_rgb(252, 91, 122),
    Color32::from_rgb(29, 161, 16),
    Color32::from_rgb(78, 193, 246),
    Color32::from_rgb(252, 76, 2),
    Color32::from_rgb(254, 221, 0),
    Color32::from_rgb(155, 38, 182),
];

const PROMPT: &str = "Enter initial velocity (m/s): ";
pub const INVALID_INPUT: &str = "Invalid input. Please enter a valid number.";

/// Aim angle shown before the first drag
const DEFAULT_THETA: f32 = -30.0;
const ARC_RADIUS: f32 = 30.0;
const PROJECTILE_RADIUS: f32 = 5.0;
/// Every n-th trail position is drawn as a dot
const TRAIL_STRIDE: usize = 5;

/// Entry point
pub fn main(runtime: &mut Runtime) -> Result<(), UnitError> {
    let mut stage = ProjectileStage::new(runtime.config.kinematics.clone());
    runtime.host.run(&mut stage)?;
    Ok(())
}

/// Parse a launch speed typed by the user
///
/// Only finite, strictly positive numbers are accepted.
pub fn parse_velocity(text: &str) -> Option<f32> {
    text.trim()
        .parse::<f32>()
        .ok()
        .filter(|v| v.is_finite() && *v > 0.0)
}

struct Shot {
    flight: Flight,
    color: Color32,
}

/// Everything on screen after the speed is chosen
pub struct ProjectileScene {
    origin: Vec2,
    gravity: f32,
    aim_radius: f32,
    flight_config: FlightConfig,
    speed: f32,
    theta: f32,
    shots: Vec<Shot>,
    current: Option<Projectile>,
}

impl ProjectileScene {
    pub fn new(config: &KinematicsConfig, speed: f32) -> Self {
        Self {
            origin: config.origin(),
            gravity: config.gravity,
            aim_radius: config.aim_radius,
            flight_config: config.to_flight_config(),
            speed,
            theta: DEFAULT_THETA,
            shots: Vec::new(),
            current: None,
        }
    }

    /// Current aim angle in screen degrees (negative is up)
    pub fn theta(&self) -> f32 {
        self.theta
    }

    /// The most recently launched projectile
    pub fn current(&self) -> Option<&Projectile> {
        self.current.as_ref()
    }

    pub fn shot_count(&self) -> usize {
        self.shots.len()
    }

    /// End of the aim line
    pub fn aim_end(&self) -> Vec2 {
        point_on_circle(self.theta, self.origin, self.aim_radius)
    }

    /// Follow the pointer while dragging; returns whether the aim changed
    pub fn aim(&mut self, pointer: Vec2) -> bool {
        match aim_angle(pointer, self.origin) {
            Some(theta) if is_launch_angle(theta) => {
                self.theta = theta;
                true
            }
            _ => false,
        }
    }

    /// Launch along the line through `pointer` if its angle is in `(-90, 0]`
    ///
    /// Only the slope matters, so a pointer down and to the left of the
    /// origin fires up and to the right as well.
    pub fn release(&mut self, pointer: Vec2, color: Color32) -> bool {
        if !self.aim(pointer) {
            return false;
        }
        let projectile = Projectile::new(self.speed, self.theta, self.gravity);
        log::debug!(
            "Launched at {} m/s, {}°: range {} m",
            self.speed,
            self.theta.abs(),
            projectile.range()
        );
        self.shots.push(Shot {
            flight: Flight::launch(projectile, self.origin, self.flight_config),
            color,
        });
        self.current = Some(projectile);
        true
    }

    /// Remove every projectile
    pub fn reset(&mut self) {
        self.shots.clear();
        self.current = None;
    }

    /// Advance all flights by one frame
    pub fn step(&mut self) {
        for shot in &mut self.shots {
            shot.flight.step();
        }
    }
}

enum Phase {
    Prompt {
        input: String,
        error: Option<&'static str>,
    },
    Scene(ProjectileScene),
}

pub struct ProjectileStage {
    config: KinematicsConfig,
    phase: Phase,
}

impl ProjectileStage {
    pub fn new(config: KinematicsConfig) -> Self {
        Self {
            config,
            phase: Phase::Prompt {
                input: String::new(),
                error: None,
            },
        }
    }
}

impl Stage for ProjectileStage {
    fn window(&self) -> WindowSpec {
        WindowSpec::new("Projectile Motion", self.config.width, self.config.height).fixed_size()
    }

    fn frame(&mut self, ctx: &egui::Context, clock: &FrameClock) -> StageControl {
        for action in InputMapper::actions(ctx, KeyBindings { quit_with_q: true }) {
            match action {
                InputAction::Exit => return StageControl::Exit,
                InputAction::Reset => {
                    if let Phase::Scene(scene) = &mut self.phase {
                        scene.reset();
                    }
                }
            }
        }

        let chosen = match &mut self.phase {
            Phase::Prompt { input, error } => prompt_ui(ctx, input, error),
            Phase::Scene(scene) => {
                scene_ui(ctx, scene, &self.config, clock);
                None
            }
        };
        if let Some(speed) = chosen {
            log::info!("Initial velocity set to {} m/s", speed);
            self.phase = Phase::Scene(ProjectileScene::new(&self.config, speed));
        }
        StageControl::Continue
    }
}

fn random_color() -> Color32 {
    COLORS
        .choose(&mut rand::thread_rng())
        .copied()
        .unwrap_or(FOREGROUND)
}

/// Velocity prompt; returns the speed once a valid one is submitted
fn prompt_ui(ctx: &egui::Context, input: &mut String, error: &mut Option<&'static str>) -> Option<f32> {
    let mut chosen = None;
    egui::CentralPanel::default()
        .frame(Frame::default().fill(BACKGROUND))
        .show(ctx, |ui| {
            ui.add_space(20.0);
            ui.horizontal(|ui| {
                ui.add_space(20.0);
                ui.label(RichText::new(PROMPT).color(FOREGROUND));
                let response = ui.add(egui::TextEdit::singleline(input).desired_width(120.0));
                if response.lost_focus() && ui.input(|i| i.key_pressed(Key::Enter)) {
                    match parse_velocity(input) {
                        Some(speed) => chosen = Some(speed),
                        None => {
                            log::debug!("Rejected velocity input {:?}", input);
                            *error = Some(INVALID_INPUT);
                        }
                    }
                }
                response.request_focus();
            });
            if let Some(message) = error {
                ui.add_space(8.0);
                ui.horizontal(|ui| {
                    ui.add_space(20.0);
                    ui.colored_label(ui.visuals().error_fg_color, *message);
                });
            }
        });
    chosen
}

fn scene_ui(ctx: &egui::Context, scene: &mut ProjectileScene, config: &KinematicsConfig, clock: &FrameClock) {
    egui::CentralPanel::default()
        .frame(Frame::default().fill(BACKGROUND))
        .show(ctx, |ui| {
            let (response, painter) = ui.allocate_painter(ui.available_size(), Sense::click_and_drag());
            let offset = response.rect.min.to_vec2();
            let to_screen = |p: Vec2| Pos2::new(p.x, p.y) + offset;
            let pointer = ui
                .input(|i| i.pointer.latest_pos())
                .map(|p| Vec2::new(p.x - offset.x, p.y - offset.y));

            if let Some(pointer) = pointer {
                if response.dragged() {
                    scene.aim(pointer);
                }
                if response.drag_stopped() || response.clicked() {
                    scene.release(pointer, random_color());
                }
            }
            scene.step();

            let origin = scene.origin;
            let axis = Stroke::new(2.0, FOREGROUND);
            painter.line_segment([to_screen(origin), to_screen(origin + Vec2::new(1400.0, 0.0))], axis);
            painter.line_segment([to_screen(origin), to_screen(origin - Vec2::new(0.0, 250.0))], axis);
            painter.line_segment([to_screen(origin), to_screen(scene.aim_end())], Stroke::new(2.0, AQUA));
            painter.circle_filled(to_screen(origin), 3.0, FOREGROUND);

            // Arc between the ground and the aim line
            let arc: Vec<Pos2> = (0..=16)
                .map(|i| scene.theta * i as f32 / 16.0)
                .map(|t| to_screen(point_on_circle(t, origin, ARC_RADIUS)))
                .collect();
            painter.add(Shape::line(arc, Stroke::new(2.0, AQUA)));

            for shot in &scene.shots {
                let trail: Vec<Vec2> = shot.flight.trail().collect();
                if let Some((last, rest)) = trail.split_last() {
                    for p in rest.iter().step_by(TRAIL_STRIDE) {
                        painter.circle_filled(to_screen(*p), 1.0, FOREGROUND);
                    }
                    painter.circle_filled(to_screen(*last), PROJECTILE_RADIUS, shot.color);
                    painter.circle_stroke(to_screen(*last), PROJECTILE_RADIUS, Stroke::new(1.0, FOREGROUND));
                }
            }

            let font = FontId::proportional(12.0);
            let text = |pos: Vec2, s: String, color: Color32| {
                painter.text(to_screen(pos), Align2::LEFT_TOP, s, font.clone(), color);
            };
            let angle = scene.theta.abs() as i32;
            text(Vec2::new(700.0, 30.0), "PROJECTILE MOTION".to_string(), FOREGROUND);
            text(Vec2::new(20.0, 400.0), format!("FPS : {}", clock.fps as i32), FOREGROUND);
            text(Vec2::new(20.0, 420.0), format!("Angle : {}", angle), FOREGROUND);
            text(origin + Vec2::new(38.0, -20.0), format!("{}°", angle), YELLOW);

            if let Some(p) = scene.current() {
                let x = config.width as f32 - 250.0;
                text(Vec2::new(x, 400.0), format!("Velocity : {}m/s", p.speed()), FOREGROUND);
                text(Vec2::new(x, 420.0), format!("Time : {}s", p.time_of_flight()), FOREGROUND);
                text(Vec2::new(x, 440.0), format!("Range : {}m", p.range()), FOREGROUND);
                text(Vec2::new(x, 460.0), format!("Max Height : {}m", p.max_height()), FOREGROUND);
            }
        });
}
