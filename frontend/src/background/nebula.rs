use std::f64::consts::PI;

use rand::Rng;

pub type Vec3 = [f64; 3];

/// How a layer's particles are scattered at startup.
#[derive(Clone, Copy, Debug)]
enum Spread {
    /// Uniform on a spherical shell between two radii.
    Shell { min: f64, max: f64 },
    /// `random^power * range + offset`, denser towards the inner radius.
    Skewed { power: f64, range: f64, offset: f64 },
}

#[derive(Clone, Copy, Debug)]
struct LayerProfile {
    desktop: usize,
    mobile: usize,
    spread: Spread,
    z_offset: f64,
    drift: Vec3,
    bound: f64,
    color: &'static str,
    size: f64,
    opacity: f64,
}

const OUTER: LayerProfile = LayerProfile {
    desktop: 700,
    mobile: 280,
    spread: Spread::Shell { min: 90.0, max: 170.0 },
    z_offset: -10.0,
    drift: [0.005, 0.005, 0.004],
    bound: 200.0,
    color: "#2244ff",
    size: 0.5,
    opacity: 0.55,
};

const MID: LayerProfile = LayerProfile {
    desktop: 1100,
    mobile: 450,
    spread: Spread::Skewed { power: 1.8, range: 80.0, offset: 10.0 },
    z_offset: -5.0,
    drift: [0.007, 0.007, 0.005],
    bound: 120.0,
    color: "#7733ee",
    size: 0.45,
    opacity: 0.72,
};

const CORE: LayerProfile = LayerProfile {
    desktop: 450,
    mobile: 180,
    spread: Spread::Skewed { power: 3.0, range: 35.0, offset: 0.0 },
    z_offset: 0.0,
    drift: [0.009, 0.009, 0.006],
    bound: 50.0,
    color: "#ff55ee",
    size: 0.38,
    opacity: 0.85,
};

const BOUNCE: f64 = -0.6;
const REPEL_RADIUS: f64 = 18.0;
const REPEL_FORCE: f64 = 0.01;
const REPEL_MAX: usize = 300;
const ORBIT_POINTS: usize = 16;
const ORBIT_RADIUS: f64 = 42.0;
const PARALLAX_EASE: f64 = 0.035;
const DEPTH_EASE: f64 = 0.06;
pub const FOV_DEGREES: f64 = 65.0;
const LINK_DISTANCE: f64 = 16.0;
const LINK_SCAN_DESKTOP: usize = 500;
const LINK_SCAN_MOBILE: usize = 200;
pub const TENDRIL_COLOR: &str = "#5533bb";
pub const TENDRIL_OPACITY: f64 = 0.18;
const NEAR_PLANE: f64 = 0.1;

pub struct Layer {
    pub positions: Vec<Vec3>,
    pub velocities: Vec<Vec3>,
    pub bound: f64,
    pub color: &'static str,
    pub size: f64,
    pub opacity: f64,
}

impl Layer {
    fn scatter<R: Rng>(profile: &LayerProfile, mobile: bool, rng: &mut R) -> Self {
        let count = if mobile { profile.mobile } else { profile.desktop };
        let mut positions = Vec::with_capacity(count);
        let mut velocities = Vec::with_capacity(count);
        for _ in 0..count {
            let r = match profile.spread {
                Spread::Shell { min, max } => min + rng.gen::<f64>() * (max - min),
                Spread::Skewed { power, range, offset } => rng.gen::<f64>().powf(power) * range + offset,
            };
            let theta = 2.0 * PI * rng.gen::<f64>();
            let phi = (2.0 * rng.gen::<f64>() - 1.0).acos();
            positions.push([
                r * phi.sin() * theta.cos(),
                r * phi.sin() * theta.sin(),
                r * phi.cos() + profile.z_offset,
            ]);
            velocities.push([
                (rng.gen::<f64>() - 0.5) * profile.drift[0],
                (rng.gen::<f64>() - 0.5) * profile.drift[1],
                (rng.gen::<f64>() - 0.5) * profile.drift[2],
            ]);
        }
        Self {
            positions,
            velocities,
            bound: profile.bound,
            color: profile.color,
            size: profile.size,
            opacity: profile.opacity,
        }
    }

    /// Moves every particle one step; particles past the bound turn back, slower.
    pub fn drift(&mut self) {
        let bound_sq = self.bound * self.bound;
        for (p, v) in self.positions.iter_mut().zip(self.velocities.iter_mut()) {
            p[0] += v[0];
            p[1] += v[1];
            p[2] += v[2];
            if p[0] * p[0] + p[1] * p[1] + p[2] * p[2] > bound_sq {
                v[0] *= BOUNCE;
                v[1] *= BOUNCE;
                v[2] *= BOUNCE;
            }
        }
    }

    /// Pushes particles away from a point in the x/y plane.
    pub fn repel(&mut self, x: f64, y: f64) {
        let limit = self.positions.len().min(REPEL_MAX);
        for i in 0..limit {
            let dx = self.positions[i][0] - x;
            let dy = self.positions[i][1] - y;
            let d2 = dx * dx + dy * dy;
            if d2 < REPEL_RADIUS * REPEL_RADIUS && d2 > 0.0 {
                let inv = REPEL_FORCE / d2.sqrt();
                self.velocities[i][0] += dx * inv;
                self.velocities[i][1] += dy * inv;
            }
        }
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.positions.len()
    }
}

/// Per-frame inputs read from the page.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FrameInput {
    /// Pointer position normalised to `[-1, 1]` on both axes.
    pub mouse: (f64, f64),
    pub scroll_depth: f64,
    pub camera_target: f64,
    /// Seconds since the background started.
    pub time: f64,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Camera {
    pub position: Vec3,
}

/// A projected point on the canvas.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScreenPoint {
    pub x: f64,
    pub y: f64,
    /// Pixels per world unit at this depth.
    pub scale: f64,
}

pub struct Nebula {
    pub outer: Layer,
    pub mid: Layer,
    pub core: Layer,
    pub orbit: Vec<Vec3>,
    pub orbit_rotation: (f64, f64),
    pub scene_rotation: (f64, f64),
    pub camera: Camera,
    /// Mid-layer particle pairs joined by a tendril, fixed at startup.
    tendrils: Vec<(usize, usize)>,
    frame: u64,
}

impl Nebula {
    pub fn new<R: Rng>(rng: &mut R, mobile: bool, camera_distance: f64) -> Self {
        let orbit = (0..ORBIT_POINTS)
            .map(|i| {
                let a = i as f64 / ORBIT_POINTS as f64 * PI * 2.0;
                [
                    a.cos() * ORBIT_RADIUS,
                    a.sin() * ORBIT_RADIUS * 0.26,
                    a.sin() * ORBIT_RADIUS * 0.72,
                ]
            })
            .collect();
        let outer = Layer::scatter(&OUTER, mobile, rng);
        let mid = Layer::scatter(&MID, mobile, rng);
        let core = Layer::scatter(&CORE, mobile, rng);
        let scan = if mobile { LINK_SCAN_MOBILE } else { LINK_SCAN_DESKTOP };
        let tendrils = link_pairs(&mid.positions, scan, LINK_DISTANCE);
        Self {
            outer,
            mid,
            core,
            orbit,
            orbit_rotation: (0.0, 0.0),
            scene_rotation: (0.0, 0.0),
            camera: Camera {
                position: [0.0, 0.0, camera_distance],
            },
            tendrils,
            frame: 0,
        }
    }

    pub fn step(&mut self, input: &FrameInput) {
        self.frame += 1;
        let (mx, my) = input.mouse;

        let cam = &mut self.camera.position;
        cam[0] += (mx * 9.0 - cam[0]) * PARALLAX_EASE;
        cam[1] += (-my * 6.0 - cam[1]) * PARALLAX_EASE;
        cam[2] += (input.camera_target + input.scroll_depth - cam[2]) * DEPTH_EASE;

        self.scene_rotation = (
            (input.time * 0.035).sin() * 0.04,
            (input.time * 0.045).sin() * 0.08,
        );
        self.orbit_rotation.0 += 0.001;
        self.orbit_rotation.1 += 0.0035;

        // Layers drift on staggered frames.
        if self.frame % 2 == 0 {
            if self.frame % 4 == 0 {
                self.outer.drift();
            }
            self.mid.drift();
            self.core.drift();
        }

        if self.frame % 3 == 0 && (mx != 0.0 || my != 0.0) {
            self.core.repel(mx * 60.0, -my * 45.0);
        }
    }

    pub fn layers(&self) -> [&Layer; 3] {
        [&self.outer, &self.mid, &self.core]
    }

    pub fn orbit_points(&self) -> impl Iterator<Item = Vec3> + '_ {
        let (rx, ry) = self.orbit_rotation;
        self.orbit.iter().map(move |p| rotate(*p, rx, ry))
    }

    /// Tendril end points, following their particles as they drift.
    pub fn tendril_segments(&self) -> impl Iterator<Item = (Vec3, Vec3)> + '_ {
        let points = &self.mid.positions;
        self.tendrils.iter().map(move |&(a, b)| (points[a], points[b]))
    }

    /// Perspective projection of a world point, `None` when behind the camera.
    pub fn project(&self, point: Vec3, width: f64, height: f64) -> Option<ScreenPoint> {
        let (rx, ry) = self.scene_rotation;
        let p = rotate(point, rx, ry);
        let cam = self.camera.position;
        let depth = cam[2] - p[2];
        if depth <= NEAR_PLANE {
            return None;
        }
        let focal = (height / 2.0) / (FOV_DEGREES.to_radians() / 2.0).tan();
        let scale = focal / depth;
        Some(ScreenPoint {
            x: width / 2.0 + (p[0] - cam[0]) * scale,
            y: height / 2.0 - (p[1] - cam[1]) * scale,
            scale,
        })
    }
}

/// Index pairs among the first `scan` points lying closer than `distance`.
fn link_pairs(points: &[Vec3], scan: usize, distance: f64) -> Vec<(usize, usize)> {
    let points = &points[..points.len().min(scan)];
    let limit = distance * distance;
    let mut pairs = Vec::new();
    for (i, a) in points.iter().enumerate() {
        for (j, b) in points.iter().enumerate().skip(i + 1) {
            let d2: f64 = (0..3).map(|k| (a[k] - b[k]).powi(2)).sum();
            if d2 < limit {
                pairs.push((i, j));
            }
        }
    }
    pairs
}

fn rotate(p: Vec3, rx: f64, ry: f64) -> Vec3 {
    let (sy, cy) = ry.sin_cos();
    let x = p[0] * cy + p[2] * sy;
    let z = -p[0] * sy + p[2] * cy;
    let (sx, cx) = rx.sin_cos();
    let y = p[1] * cx - z * sx;
    let z = p[1] * sx + z * cx;
    [x, y, z]
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    fn nebula(mobile: bool) -> Nebula {
        let mut rng = StdRng::seed_from_u64(7);
        Nebula::new(&mut rng, mobile, 70.0)
    }

    fn radius(p: Vec3, z_offset: f64) -> f64 {
        (p[0] * p[0] + p[1] * p[1] + (p[2] - z_offset).powi(2)).sqrt()
    }

    #[test]
    fn particle_counts_follow_the_device_class() {
        let desktop = nebula(false);
        assert_eq!(
            [desktop.outer.len(), desktop.mid.len(), desktop.core.len()],
            [700, 1100, 450]
        );
        let mobile = nebula(true);
        assert_eq!([mobile.outer.len(), mobile.mid.len(), mobile.core.len()], [280, 450, 180]);
    }

    #[test]
    fn tendrils_join_only_nearby_points_within_the_scan() {
        let points = [
            [0.0, 0.0, 0.0],
            [10.0, 0.0, 0.0],
            [30.0, 0.0, 0.0],
            [0.0, 15.0, 0.0],
            [0.0, 16.0, 0.0],
        ];
        assert_eq!(link_pairs(&points, 10, 16.0), vec![(0, 1), (0, 3), (3, 4)]);
        assert_eq!(link_pairs(&points, 2, 16.0), vec![(0, 1)]);
        assert!(link_pairs(&points[..1], 10, 16.0).is_empty());
    }

    #[test]
    fn nebula_tendrils_stay_inside_the_mid_layer_scan() {
        let n = nebula(true);
        assert!(!n.tendrils.is_empty());
        for &(a, b) in &n.tendrils {
            assert!(a < b && b < LINK_SCAN_MOBILE);
        }
        for (a, b) in n.tendril_segments() {
            let d2: f64 = (0..3).map(|k| (a[k] - b[k]).powi(2)).sum();
            assert!(d2 < LINK_DISTANCE * LINK_DISTANCE);
        }
    }

    #[test]
    fn layers_are_scattered_within_their_radii() {
        let n = nebula(false);
        assert!(n.outer.positions.iter().all(|p| {
            let r = radius(*p, -10.0);
            (90.0 - 1e-9..=170.0 + 1e-9).contains(&r)
        }));
        assert!(n.mid.positions.iter().all(|p| radius(*p, -5.0) <= 90.0 + 1e-9));
        assert!(n.core.positions.iter().all(|p| radius(*p, 0.0) <= 35.0 + 1e-9));
    }

    #[test]
    fn particles_past_the_bound_turn_back() {
        let mut layer = Layer {
            positions: vec![[49.99, 0.0, 0.0], [10.0, 0.0, 0.0]],
            velocities: vec![[0.5, 0.0, 0.0], [0.5, 0.0, 0.0]],
            bound: 50.0,
            color: "#fff",
            size: 1.0,
            opacity: 1.0,
        };
        layer.drift();
        assert_eq!(layer.velocities[0], [0.5 * BOUNCE, 0.0, 0.0]);
        assert_eq!(layer.velocities[1], [0.5, 0.0, 0.0]);
    }

    #[test]
    fn repulsion_pushes_nearby_particles_away() {
        let mut layer = Layer {
            positions: vec![[5.0, 0.0, 0.0], [100.0, 0.0, 0.0]],
            velocities: vec![[0.0; 3], [0.0; 3]],
            bound: 200.0,
            color: "#fff",
            size: 1.0,
            opacity: 1.0,
        };
        layer.repel(0.0, 0.0);
        assert!(layer.velocities[0][0] > 0.0);
        assert_eq!(layer.velocities[1], [0.0; 3]);
    }

    #[test]
    fn camera_rushes_towards_a_near_target() {
        let mut n = nebula(true);
        let input = FrameInput {
            camera_target: 4.0,
            ..FrameInput::default()
        };
        let mut last = n.camera.position[2];
        for _ in 0..10 {
            n.step(&input);
            assert!(n.camera.position[2] < last);
            last = n.camera.position[2];
        }
        assert!(last > 4.0);
    }

    #[test]
    fn scroll_pushes_the_camera_back() {
        let mut n = nebula(true);
        let input = FrameInput {
            camera_target: 70.0,
            scroll_depth: 20.0,
            ..FrameInput::default()
        };
        n.step(&input);
        assert!(n.camera.position[2] > 70.0);
    }

    #[test]
    fn points_behind_the_camera_are_not_projected() {
        let n = nebula(true);
        assert!(n.project([0.0, 0.0, 80.0], 800.0, 600.0).is_none());
        let centre = n.project([0.0, 0.0, 0.0], 800.0, 600.0).expect("in front");
        assert!((centre.x - 400.0).abs() < 1e-9);
        assert!((centre.y - 300.0).abs() < 1e-9);
        let near = n.project([0.0, 0.0, 30.0], 800.0, 600.0).expect("in front");
        assert!(near.scale > centre.scale);
    }
}
