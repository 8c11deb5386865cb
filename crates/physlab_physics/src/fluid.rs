//! Buoyant smoke plume on Eulerian grids
//!
//! Smoke density lives on a cell-centred grid; velocity lives on a staggered
//! (MAC) grid with x-velocities on vertical cell faces and y-velocities on
//! horizontal ones. Each step:
//!
//! 1. smoke is advected with MacCormack and the inflow is added
//! 2. buoyancy from the new smoke pushes the velocity upward
//! 3. velocity is advected semi-Lagrangian through itself
//! 4. a pressure solve removes divergence
//!
//! Coordinates are domain units with the origin in the lower-left corner and
//! +y pointing up. Grid index `(i, j)` runs along x and y respectively.

use physlab_math::Vec2;

/// What a grid reports for samples outside its domain
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Extrapolation {
    /// Everything outside is zero (solid walls for velocity)
    Zero,
    /// Outside takes the value of the nearest edge sample
    Boundary,
}

/// A scalar field sampled on a regular lattice
#[derive(Clone, Debug, PartialEq)]
pub struct Grid {
    width: usize,
    height: usize,
    spacing: Vec2,
    /// Position of sample (0, 0) in cells
    offset: Vec2,
    extrapolation: Extrapolation,
    values: Vec<f32>,
}

impl Grid {
    /// Zero-filled grid of `resolution` cells covering `bounds`, sampled at cell centres
    pub fn centered(resolution: (usize, usize), bounds: Vec2, extrapolation: Extrapolation) -> Self {
        let (nx, ny) = resolution;
        let spacing = Vec2::new(bounds.x / nx as f32, bounds.y / ny as f32);
        Self::with_layout(nx, ny, spacing, Vec2::new(0.5, 0.5), extrapolation)
    }

    fn with_layout(
        width: usize,
        height: usize,
        spacing: Vec2,
        offset: Vec2,
        extrapolation: Extrapolation,
    ) -> Self {
        Self {
            width,
            height,
            spacing,
            offset,
            extrapolation,
            values: vec![0.0; width * height],
        }
    }

    /// Fill every sample from a function of its position
    pub fn fill_with(&mut self, f: impl Fn(Vec2) -> f32) {
        for j in 0..self.height {
            for i in 0..self.width {
                let p = self.position(i, j);
                self.values[j * self.width + i] = f(p);
            }
        }
    }

    /// Number of samples along x and y
    pub fn resolution(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    pub fn spacing(&self) -> Vec2 {
        self.spacing
    }

    /// Raw values, row-major with row 0 at the bottom
    pub fn values(&self) -> &[f32] {
        &self.values
    }

    /// Domain position of sample `(i, j)`
    pub fn position(&self, i: usize, j: usize) -> Vec2 {
        Vec2::new(
            (i as f32 + self.offset.x) * self.spacing.x,
            (j as f32 + self.offset.y) * self.spacing.y,
        )
    }

    /// Sample value with out-of-range indices resolved by the extrapolation
    pub fn get(&self, i: isize, j: isize) -> f32 {
        let inside = i >= 0 && j >= 0 && (i as usize) < self.width && (j as usize) < self.height;
        if inside {
            return self.values[j as usize * self.width + i as usize];
        }
        match self.extrapolation {
            Extrapolation::Zero => 0.0,
            Extrapolation::Boundary => {
                let ci = i.clamp(0, self.width as isize - 1) as usize;
                let cj = j.clamp(0, self.height as isize - 1) as usize;
                self.values[cj * self.width + ci]
            }
        }
    }

    pub fn set(&mut self, i: usize, j: usize, value: f32) {
        self.values[j * self.width + i] = value;
    }

    /// Bilinear interpolation at a domain position
    pub fn sample(&self, p: Vec2) -> f32 {
        self.sample_with_range(p).0
    }

    /// Bilinear sample plus the min and max of the four contributing samples
    fn sample_with_range(&self, p: Vec2) -> (f32, f32, f32) {
        let gx = p.x / self.spacing.x - self.offset.x;
        let gy = p.y / self.spacing.y - self.offset.y;
        let x0 = gx.floor();
        let y0 = gy.floor();
        let tx = gx - x0;
        let ty = gy - y0;
        let (i, j) = (x0 as isize, y0 as isize);

        let v00 = self.get(i, j);
        let v10 = self.get(i + 1, j);
        let v01 = self.get(i, j + 1);
        let v11 = self.get(i + 1, j + 1);

        let bottom = v00 + (v10 - v00) * tx;
        let top = v01 + (v11 - v01) * tx;
        let value = bottom + (top - bottom) * ty;

        let lo = v00.min(v10).min(v01).min(v11);
        let hi = v00.max(v10).max(v01).max(v11);
        (value, lo, hi)
    }

    pub fn sum(&self) -> f32 {
        self.values.iter().sum()
    }

    pub fn max_value(&self) -> f32 {
        self.values.iter().copied().fold(f32::NEG_INFINITY, f32::max)
    }

    /// Semi-Lagrangian advection: trace each sample back through `velocity`
    pub fn advect_semi_lagrangian(&self, velocity: &StaggeredVelocity, dt: f32) -> Grid {
        let mut out = self.clone();
        for j in 0..self.height {
            for i in 0..self.width {
                let p = self.position(i, j);
                let departure = p - velocity.sample(p) * dt;
                out.set(i, j, self.sample(departure));
            }
        }
        out
    }

    /// MacCormack advection with a min/max limiter
    ///
    /// A forward and a backward semi-Lagrangian pass estimate the error of
    /// the forward pass, half of which is subtracted. The result is clamped
    /// to the values around the departure point so no new extrema appear.
    pub fn advect_mac_cormack(&self, velocity: &StaggeredVelocity, dt: f32) -> Grid {
        let forward = self.advect_semi_lagrangian(velocity, dt);
        let backward = forward.advect_semi_lagrangian(velocity, -dt);

        let mut out = forward.clone();
        for j in 0..self.height {
            for i in 0..self.width {
                let idx = j * self.width + i;
                let corrected =
                    forward.values[idx] + 0.5 * (self.values[idx] - backward.values[idx]);

                let p = self.position(i, j);
                let departure = p - velocity.sample(p) * dt;
                let (_, lo, hi) = self.sample_with_range(departure);
                out.values[idx] = corrected.clamp(lo, hi);
            }
        }
        out
    }
}

impl std::ops::AddAssign<&Grid> for Grid {
    fn add_assign(&mut self, other: &Grid) {
        debug_assert_eq!(self.values.len(), other.values.len());
        for (a, b) in self.values.iter_mut().zip(&other.values) {
            *a += *b;
        }
    }
}

/// Velocity on a staggered grid with solid walls
#[derive(Clone, Debug, PartialEq)]
pub struct StaggeredVelocity {
    cells: (usize, usize),
    spacing: Vec2,
    /// x-velocity on vertical faces, `(nx + 1) × ny`
    u: Grid,
    /// y-velocity on horizontal faces, `nx × (ny + 1)`
    v: Grid,
}

impl StaggeredVelocity {
    /// Zero velocity on `resolution` cells covering `bounds`
    pub fn new(resolution: (usize, usize), bounds: Vec2) -> Self {
        let (nx, ny) = resolution;
        let spacing = Vec2::new(bounds.x / nx as f32, bounds.y / ny as f32);
        Self {
            cells: resolution,
            spacing,
            u: Grid::with_layout(nx + 1, ny, spacing, Vec2::new(0.0, 0.5), Extrapolation::Zero),
            v: Grid::with_layout(nx, ny + 1, spacing, Vec2::new(0.5, 0.0), Extrapolation::Zero),
        }
    }

    pub fn resolution(&self) -> (usize, usize) {
        self.cells
    }

    pub fn u(&self) -> &Grid {
        &self.u
    }

    pub fn v(&self) -> &Grid {
        &self.v
    }

    /// Overwrite both components from a function of position
    pub fn fill_with(&mut self, f: impl Fn(Vec2) -> Vec2) {
        self.u.fill_with(|p| f(p).x);
        self.v.fill_with(|p| f(p).y);
        self.enforce_walls();
    }

    /// Interpolated velocity at a domain position
    pub fn sample(&self, p: Vec2) -> Vec2 {
        Vec2::new(self.u.sample(p), self.v.sample(p))
    }

    /// Divergence per cell, on a cell-centred grid
    pub fn divergence(&self) -> Grid {
        let (nx, ny) = self.cells;
        let bounds = Vec2::new(nx as f32 * self.spacing.x, ny as f32 * self.spacing.y);
        let mut div = Grid::centered(self.cells, bounds, Extrapolation::Zero);
        for j in 0..ny {
            for i in 0..nx {
                let (ii, jj) = (i as isize, j as isize);
                let du = self.u.get(ii + 1, jj) - self.u.get(ii, jj);
                let dv = self.v.get(ii, jj + 1) - self.v.get(ii, jj);
                div.set(i, j, du / self.spacing.x + dv / self.spacing.y);
            }
        }
        div
    }

    /// Advect the velocity through itself (semi-Lagrangian)
    pub fn advect_self(&self, dt: f32) -> Self {
        let mut out = self.clone();
        out.u = self.u.advect_semi_lagrangian(self, dt);
        out.v = self.v.advect_semi_lagrangian(self, dt);
        out.enforce_walls();
        out
    }

    /// Add an upward force proportional to the smoke density
    pub fn add_buoyancy(&mut self, smoke: &Grid, strength: f32, dt: f32) {
        let (w, h) = self.v.resolution();
        for j in 0..h {
            for i in 0..w {
                let p = self.v.position(i, j);
                let idx = j * w + i;
                self.v.values[idx] += smoke.sample(p) * strength * dt;
            }
        }
        self.enforce_walls();
    }

    /// Project onto a divergence-free field
    ///
    /// Solves `∇²p = ∇·u` with successive over-relaxation and Neumann
    /// boundaries, then subtracts `∇p` on interior faces. Returns the
    /// pressure.
    pub fn make_incompressible(&mut self, iterations: usize, relaxation: f32) -> Grid {
        let (nx, ny) = self.cells;
        let div = self.divergence();
        let mut pressure = div.clone();
        pressure.values.iter_mut().for_each(|p| *p = 0.0);

        let ax = 1.0 / (self.spacing.x * self.spacing.x);
        let ay = 1.0 / (self.spacing.y * self.spacing.y);

        for _ in 0..iterations {
            for j in 0..ny {
                for i in 0..nx {
                    let mut sum = 0.0;
                    let mut diag = 0.0;
                    if i > 0 {
                        sum += ax * pressure.values[j * nx + i - 1];
                        diag += ax;
                    }
                    if i + 1 < nx {
                        sum += ax * pressure.values[j * nx + i + 1];
                        diag += ax;
                    }
                    if j > 0 {
                        sum += ay * pressure.values[(j - 1) * nx + i];
                        diag += ay;
                    }
                    if j + 1 < ny {
                        sum += ay * pressure.values[(j + 1) * nx + i];
                        diag += ay;
                    }
                    if diag == 0.0 {
                        continue;
                    }
                    let idx = j * nx + i;
                    let target = (sum - div.values[idx]) / diag;
                    pressure.values[idx] += relaxation * (target - pressure.values[idx]);
                }
            }
        }

        // Interior faces only; wall faces stay zero
        for j in 0..ny {
            for i in 1..nx {
                let grad = (pressure.values[j * nx + i] - pressure.values[j * nx + i - 1])
                    / self.spacing.x;
                self.u.values[j * (nx + 1) + i] -= grad;
            }
        }
        for j in 1..ny {
            for i in 0..nx {
                let grad = (pressure.values[j * nx + i] - pressure.values[(j - 1) * nx + i])
                    / self.spacing.y;
                self.v.values[j * nx + i] -= grad;
            }
        }
        self.enforce_walls();
        pressure
    }

    /// Zero the normal velocity on the domain boundary
    fn enforce_walls(&mut self) {
        let (nx, ny) = self.cells;
        for j in 0..ny {
            self.u.values[j * (nx + 1)] = 0.0;
            self.u.values[j * (nx + 1) + nx] = 0.0;
        }
        for i in 0..nx {
            self.v.values[i] = 0.0;
            self.v.values[ny * nx + i] = 0.0;
        }
    }
}

/// Parameters of the smoke plume
#[derive(Clone, Debug, PartialEq)]
pub struct PlumeConfig {
    /// Domain size
    pub bounds: Vec2,
    /// Smoke cells per side
    pub smoke_resolution: usize,
    /// Velocity cells per side
    pub velocity_resolution: usize,
    /// Centre of the smoke source
    pub inflow_center: Vec2,
    pub inflow_radius: f32,
    /// Density added per step at the source centre
    pub inflow_rate: f32,
    /// Upward force per unit smoke density
    pub buoyancy: f32,
    pub dt: f32,
    pub pressure_iterations: usize,
    /// Over-relaxation factor for the pressure solve (1 = Gauss-Seidel)
    pub relaxation: f32,
    /// Steps before the plume reports itself finished
    pub time_steps: usize,
}

impl Default for PlumeConfig {
    fn default() -> Self {
        Self {
            bounds: Vec2::new(100.0, 100.0),
            smoke_resolution: 200,
            velocity_resolution: 64,
            inflow_center: Vec2::new(40.0, 9.5),
            inflow_radius: 5.0,
            inflow_rate: 0.2,
            buoyancy: 0.1,
            dt: 1.0,
            pressure_iterations: 100,
            relaxation: 1.8,
            time_steps: 150,
        }
    }
}

/// Soft-edged disc mask: 1 inside, 0 outside, linear across one cell at the rim
pub fn soft_sphere_mask(p: Vec2, center: Vec2, radius: f32, cell: f32) -> f32 {
    let d = p.distance(center);
    ((radius - d) / cell + 0.5).clamp(0.0, 1.0)
}

/// Smoke rising from a circular source
pub struct SmokePlume {
    config: PlumeConfig,
    velocity: StaggeredVelocity,
    smoke: Grid,
    inflow: Grid,
    steps: usize,
}

impl SmokePlume {
    pub fn new(config: PlumeConfig) -> Self {
        let n = config.smoke_resolution.max(1);
        let m = config.velocity_resolution.max(1);
        let velocity = StaggeredVelocity::new((m, m), config.bounds);
        let smoke = Grid::centered((n, n), config.bounds, Extrapolation::Boundary);

        let mut inflow = Grid::centered((n, n), config.bounds, Extrapolation::Zero);
        let cell = smoke.spacing().x.min(smoke.spacing().y);
        let (center, radius, rate) = (config.inflow_center, config.inflow_radius, config.inflow_rate);
        inflow.fill_with(|p| rate * soft_sphere_mask(p, center, radius, cell));

        log::debug!(
            "Smoke plume: {}x{} smoke cells, {}x{} velocity cells, {} steps",
            n, n, m, m, config.time_steps
        );

        Self {
            config,
            velocity,
            smoke,
            inflow,
            steps: 0,
        }
    }

    pub fn config(&self) -> &PlumeConfig {
        &self.config
    }

    pub fn smoke(&self) -> &Grid {
        &self.smoke
    }

    pub fn velocity(&self) -> &StaggeredVelocity {
        &self.velocity
    }

    pub fn steps_taken(&self) -> usize {
        self.steps
    }

    pub fn is_finished(&self) -> bool {
        self.steps >= self.config.time_steps
    }

    /// Fraction of the configured steps completed, in `[0, 1]`
    pub fn progress(&self) -> f32 {
        if self.config.time_steps == 0 {
            return 1.0;
        }
        (self.steps as f32 / self.config.time_steps as f32).min(1.0)
    }

    /// Advance the plume by one time step
    pub fn step(&mut self) {
        let dt = self.config.dt;

        let mut smoke = self.smoke.advect_mac_cormack(&self.velocity, dt);
        smoke += &self.inflow;

        let mut velocity = self.velocity.advect_self(dt);
        velocity.add_buoyancy(&smoke, self.config.buoyancy, dt);
        velocity.make_incompressible(self.config.pressure_iterations, self.config.relaxation);

        self.smoke = smoke;
        self.velocity = velocity;
        self.steps += 1;
    }
}
