//! Scene description text parser.
//!
//! One directive per line, whitespace-separated, `#` starts a comment.
//!
//! # Supported Syntax
//!
//! - `cam ex ey ez llx lly llz lrx lry lrz ulx uly ulz urx ury urz`
//! - `sph cx cy cz r`
//! - `tri ax ay az bx by bz cx cy cz`
//! - `obj path/to/mesh.obj`
//! - `ltp px py pz r g b [falloff]` (falloff 0 none, 1 linear, 2 quadratic)
//! - `ltd dx dy dz r g b`
//! - `lta r g b`
//! - `mat kar kag kab kdr kdg kdb ksr ksg ksb p krr krg krb`
//! - `xft tx ty tz`, `xfr rx ry rz` (degrees), `xfs sx sy sz`
//! - `xfz` (also `xfs` with no arguments) resets the current transform
//!
//! Transform directives stack: the most recent one is applied to the object
//! first. Shapes pick up the transform and material current when they are read.
//! Bad lines are logged and skipped; only unreadable files are errors.

use std::fs;
use std::path::{Path, PathBuf};

use glint_math::{Camera, Transform, Vec3};
use thiserror::Error;

use crate::{Falloff, Light, Material, Mesh, MeshError, Object, Primitive, SceneDescription};

/// Errors that can occur during scene parsing.
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("Cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Cannot read mesh {}: {source}", path.display())]
    Mesh { path: PathBuf, source: MeshError },
}

/// Result type for parsing operations.
pub type ParseResult<T> = Result<T, ParseError>;

/// Incremental scene parser.
///
/// The current transform and material carry over between calls, so several
/// files parse as if they were concatenated.
#[derive(Debug, Default)]
pub struct SceneParser {
    description: SceneDescription,
    transform: Transform,
    material: Material,
    warnings: usize,
}

impl SceneParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a scene file. Relative `obj` paths resolve against its directory.
    pub fn parse_file(&mut self, path: impl AsRef<Path>) -> ParseResult<()> {
        let path = path.as_ref();
        let source = fs::read_to_string(path).map_err(|source| ParseError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let objects_before = self.description.object_count();
        self.parse_str(&source, path.parent())?;

        log::debug!(
            "Parsed {}: {} objects added",
            path.display(),
            self.description.object_count() - objects_before
        );
        Ok(())
    }

    /// Parse scene text. `base_dir` is used to resolve relative `obj` paths.
    pub fn parse_str(&mut self, source: &str, base_dir: Option<&Path>) -> ParseResult<()> {
        for (i, raw) in source.lines().enumerate() {
            self.parse_line(i + 1, raw, base_dir)?;
        }
        Ok(())
    }

    /// Number of lines reported so far (skipped or partially ignored).
    pub fn warning_count(&self) -> usize {
        self.warnings
    }

    /// The transform applied to the next shape.
    pub fn current_transform(&self) -> &Transform {
        &self.transform
    }

    pub fn finish(self) -> SceneDescription {
        self.description
    }

    fn warn(&mut self, line_no: usize, message: &str, line: &str) {
        self.warnings += 1;
        log::warn!("line {}: {}: {}", line_no, message, line.trim());
    }

    fn parse_line(&mut self, line_no: usize, raw: &str, base_dir: Option<&Path>) -> ParseResult<()> {
        let line = raw.split('#').next().unwrap_or("");
        let mut tokens = line.split_whitespace();
        let Some(directive) = tokens.next() else {
            return Ok(());
        };
        let args: Vec<&str> = tokens.collect();

        // Each arm returns how many arguments it consumed, or None if malformed.
        let consumed = match directive {
            "cam" => numbers::<15>(&args).map(|v| {
                self.description.camera = Some(Camera::new(
                    vec3(&v[0..3]),
                    vec3(&v[3..6]),
                    vec3(&v[6..9]),
                    vec3(&v[9..12]),
                    vec3(&v[12..15]),
                ));
                15
            }),
            "sph" => numbers::<4>(&args).map(|v| {
                self.add_primitive(Primitive::Sphere {
                    center: vec3(&v[0..3]),
                    radius: v[3],
                });
                4
            }),
            "tri" => numbers::<9>(&args).map(|v| {
                self.add_primitive(Primitive::Triangle {
                    a: vec3(&v[0..3]),
                    b: vec3(&v[3..6]),
                    c: vec3(&v[6..9]),
                });
                9
            }),
            "obj" => match args.first() {
                Some(file) => {
                    self.add_mesh(resolve(file, base_dir))?;
                    Some(1)
                }
                None => None,
            },
            "ltp" => numbers::<6>(&args).map(|v| {
                let (falloff, used) = match args.get(6).and_then(|s| s.parse::<f32>().ok()) {
                    Some(code) => (Falloff::from_code(code as i32), 7),
                    None => (Falloff::None, 6),
                };
                self.description
                    .add_light(Light::point(vec3(&v[0..3]), falloff, vec3(&v[3..6])));
                used
            }),
            "ltd" => numbers::<6>(&args).map(|v| {
                self.description
                    .add_light(Light::directional(vec3(&v[0..3]), vec3(&v[3..6])));
                6
            }),
            "lta" => numbers::<3>(&args).map(|v| {
                self.description.add_light(Light::ambient(vec3(&v[0..3])));
                3
            }),
            "mat" => numbers::<13>(&args).map(|v| {
                self.material = Material::new(
                    vec3(&v[0..3]),
                    vec3(&v[3..6]),
                    vec3(&v[6..9]),
                    v[9],
                    vec3(&v[10..13]),
                );
                13
            }),
            "xft" => numbers::<3>(&args).map(|v| {
                self.push_transform(Transform::translation(vec3(&v)));
                3
            }),
            "xfr" => numbers::<3>(&args).map(|v| {
                self.push_transform(Transform::rotation(vec3(&v)));
                3
            }),
            "xfs" if args.is_empty() => {
                self.transform.reset();
                Some(0)
            }
            "xfs" => numbers::<3>(&args).map(|v| {
                self.push_transform(Transform::scale(vec3(&v)));
                3
            }),
            "xfz" => {
                self.transform.reset();
                Some(0)
            }
            _ => {
                self.warn(line_no, "unsupported directive", raw);
                return Ok(());
            }
        };

        match consumed {
            None => self.warn(line_no, "missing or malformed parameters, line skipped", raw),
            Some(n) if args.len() > n => self.warn(line_no, "ignoring extra parameters", raw),
            Some(_) => {}
        }
        Ok(())
    }

    fn add_primitive(&mut self, primitive: Primitive) {
        self.description
            .add_object(Object::new(primitive, self.transform, self.material));
    }

    fn add_mesh(&mut self, path: PathBuf) -> ParseResult<()> {
        let mesh = Mesh::load_obj(&path).map_err(|source| ParseError::Mesh {
            path: path.clone(),
            source,
        })?;

        for [a, b, c] in mesh.triangles() {
            self.add_primitive(Primitive::Triangle { a, b, c });
        }
        log::info!(
            "Loaded mesh {} ({} triangles)",
            path.display(),
            mesh.triangle_count()
        );
        Ok(())
    }

    fn push_transform(&mut self, op: Transform) {
        self.transform = op.then(&self.transform);
    }
}

/// Parse every file in order into one scene description.
pub fn load_scene<P: AsRef<Path>>(paths: &[P]) -> ParseResult<SceneDescription> {
    let mut parser = SceneParser::new();
    for path in paths {
        parser.parse_file(path)?;
    }

    if parser.warning_count() > 0 {
        log::warn!("{} scene lines were skipped or partially ignored", parser.warning_count());
    }
    Ok(parser.finish())
}

/// The first `N` arguments as numbers, or None if any is missing or bad.
fn numbers<const N: usize>(args: &[&str]) -> Option<[f32; N]> {
    if args.len() < N {
        return None;
    }
    let mut out = [0.0; N];
    for (value, token) in out.iter_mut().zip(args) {
        *value = token.parse().ok()?;
    }
    Some(out)
}

fn vec3(v: &[f32]) -> Vec3 {
    Vec3::new(v[0], v[1], v[2])
}

fn resolve(file: &str, base_dir: Option<&Path>) -> PathBuf {
    let path = Path::new(file);
    match base_dir {
        Some(dir) if path.is_relative() => dir.join(path),
        _ => path.to_path_buf(),
    }
}
