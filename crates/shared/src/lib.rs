use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Уникальный идентификатор объекта в сцене
pub type ObjectId = String;

/// Ошибки валидации параметров фигур
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ShapeError {
    /// Параметр отсутствует или имеет недопустимое значение
    #[error("invalid parameter `{field}` for {kind}: {reason}")]
    InvalidParameter {
        kind: PrimitiveKind,
        field: &'static str,
        reason: String,
    },
    /// Неизвестный тип примитива
    #[error("unknown primitive kind `{0}`")]
    UnknownKind(String),
}

/// Тип примитива
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrimitiveKind {
    Cube,
    Sphere,
    Cylinder,
    Plane,
    Cone,
    Torus,
}

impl PrimitiveKind {
    /// Все поддерживаемые типы (в порядке отображения в меню)
    pub const ALL: [PrimitiveKind; 6] = [
        PrimitiveKind::Cube,
        PrimitiveKind::Sphere,
        PrimitiveKind::Cylinder,
        PrimitiveKind::Plane,
        PrimitiveKind::Cone,
        PrimitiveKind::Torus,
    ];

    /// Имя для меню и статусной строки
    pub fn label(&self) -> &'static str {
        match self {
            PrimitiveKind::Cube => "Cube",
            PrimitiveKind::Sphere => "Sphere",
            PrimitiveKind::Cylinder => "Cylinder",
            PrimitiveKind::Plane => "Plane",
            PrimitiveKind::Cone => "Cone",
            PrimitiveKind::Torus => "Torus",
        }
    }
}

impl fmt::Display for PrimitiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PrimitiveKind::Cube => "cube",
            PrimitiveKind::Sphere => "sphere",
            PrimitiveKind::Cylinder => "cylinder",
            PrimitiveKind::Plane => "plane",
            PrimitiveKind::Cone => "cone",
            PrimitiveKind::Torus => "torus",
        };
        f.write_str(name)
    }
}

impl FromStr for PrimitiveKind {
    type Err = ShapeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "cube" => Ok(PrimitiveKind::Cube),
            "sphere" => Ok(PrimitiveKind::Sphere),
            "cylinder" => Ok(PrimitiveKind::Cylinder),
            "plane" => Ok(PrimitiveKind::Plane),
            "cone" => Ok(PrimitiveKind::Cone),
            "torus" => Ok(PrimitiveKind::Torus),
            other => Err(ShapeError::UnknownKind(other.to_string())),
        }
    }
}

/// Сырые поля панели свойств. Каждый тип примитива использует
/// только своё подмножество полей; остальные остаются пустыми.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ShapeFields {
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub depth: Option<f64>,
    pub radius: Option<f64>,
    pub tube_radius: Option<f64>,
    pub segments: Option<u32>,
}

/// Примитив с параметрами, специфичными для типа
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Primitive {
    Cube {
        width: f64,
        height: f64,
        depth: f64,
    },
    Sphere {
        radius: f64,
        segments: u32,
    },
    Cylinder {
        radius: f64,
        height: f64,
        segments: u32,
    },
    Plane {
        width: f64,
        height: f64,
    },
    Cone {
        radius: f64,
        height: f64,
        segments: u32,
    },
    Torus {
        radius: f64,
        tube_radius: f64,
        segments: u32,
    },
}

impl Primitive {
    /// Тип примитива
    pub fn kind(&self) -> PrimitiveKind {
        match self {
            Primitive::Cube { .. } => PrimitiveKind::Cube,
            Primitive::Sphere { .. } => PrimitiveKind::Sphere,
            Primitive::Cylinder { .. } => PrimitiveKind::Cylinder,
            Primitive::Plane { .. } => PrimitiveKind::Plane,
            Primitive::Cone { .. } => PrimitiveKind::Cone,
            Primitive::Torus { .. } => PrimitiveKind::Torus,
        }
    }

    /// Примитив с параметрами по умолчанию для данного типа
    pub fn default_for(kind: PrimitiveKind) -> Primitive {
        match kind {
            PrimitiveKind::Cube => Primitive::Cube {
                width: 1.0,
                height: 1.0,
                depth: 1.0,
            },
            PrimitiveKind::Sphere => Primitive::Sphere {
                radius: 1.0,
                segments: 8,
            },
            PrimitiveKind::Cylinder => Primitive::Cylinder {
                radius: 1.0,
                height: 1.0,
                segments: 8,
            },
            PrimitiveKind::Plane => Primitive::Plane {
                width: 1.0,
                height: 1.0,
            },
            PrimitiveKind::Cone => Primitive::Cone {
                radius: 1.0,
                height: 1.0,
                segments: 8,
            },
            PrimitiveKind::Torus => Primitive::Torus {
                radius: 1.0,
                tube_radius: 0.4,
                segments: 8,
            },
        }
    }

    /// Собрать примитив из полей панели. Берутся только поля,
    /// относящиеся к данному типу; лишние поля игнорируются.
    pub fn from_fields(kind: PrimitiveKind, fields: &ShapeFields) -> Result<Primitive, ShapeError> {
        let dim = |field: &'static str, value: Option<f64>| -> Result<f64, ShapeError> {
            let v = value.ok_or_else(|| ShapeError::InvalidParameter {
                kind,
                field,
                reason: "value is missing".to_string(),
            })?;
            if !v.is_finite() {
                return Err(ShapeError::InvalidParameter {
                    kind,
                    field,
                    reason: "value is not a finite number".to_string(),
                });
            }
            if v <= 0.0 {
                return Err(ShapeError::InvalidParameter {
                    kind,
                    field,
                    reason: "value must be positive".to_string(),
                });
            }
            Ok(v)
        };
        let seg = |value: Option<u32>| -> Result<u32, ShapeError> {
            let v = value.ok_or(ShapeError::InvalidParameter {
                kind,
                field: "segments",
                reason: "value is missing".to_string(),
            })?;
            if v < 3 {
                return Err(ShapeError::InvalidParameter {
                    kind,
                    field: "segments",
                    reason: "at least 3 segments required".to_string(),
                });
            }
            Ok(v)
        };

        match kind {
            PrimitiveKind::Cube => Ok(Primitive::Cube {
                width: dim("width", fields.width)?,
                height: dim("height", fields.height)?,
                depth: dim("depth", fields.depth)?,
            }),
            PrimitiveKind::Sphere => Ok(Primitive::Sphere {
                radius: dim("radius", fields.radius)?,
                segments: seg(fields.segments)?,
            }),
            PrimitiveKind::Cylinder => Ok(Primitive::Cylinder {
                radius: dim("radius", fields.radius)?,
                height: dim("height", fields.height)?,
                segments: seg(fields.segments)?,
            }),
            PrimitiveKind::Plane => Ok(Primitive::Plane {
                width: dim("width", fields.width)?,
                height: dim("height", fields.height)?,
            }),
            PrimitiveKind::Cone => Ok(Primitive::Cone {
                radius: dim("radius", fields.radius)?,
                height: dim("height", fields.height)?,
                segments: seg(fields.segments)?,
            }),
            PrimitiveKind::Torus => Ok(Primitive::Torus {
                radius: dim("radius", fields.radius)?,
                tube_radius: dim("tube_radius", fields.tube_radius)?,
                segments: seg(fields.segments)?,
            }),
        }
    }

    /// Поля для предзаполнения панели свойств. Поля, не относящиеся
    /// к типу, остаются `None` (пустыми), а не наследуются от
    /// предыдущей фигуры.
    pub fn fields(&self) -> ShapeFields {
        let mut f = ShapeFields::default();
        match *self {
            Primitive::Cube {
                width,
                height,
                depth,
            } => {
                f.width = Some(width);
                f.height = Some(height);
                f.depth = Some(depth);
            }
            Primitive::Sphere { radius, segments } => {
                f.radius = Some(radius);
                f.segments = Some(segments);
            }
            Primitive::Cylinder {
                radius,
                height,
                segments,
            } => {
                f.radius = Some(radius);
                f.height = Some(height);
                f.segments = Some(segments);
            }
            Primitive::Plane { width, height } => {
                f.width = Some(width);
                f.height = Some(height);
            }
            Primitive::Cone {
                radius,
                height,
                segments,
            } => {
                f.radius = Some(radius);
                f.height = Some(height);
                f.segments = Some(segments);
            }
            Primitive::Torus {
                radius,
                tube_radius,
                segments,
            } => {
                f.radius = Some(radius);
                f.tube_radius = Some(tube_radius);
                f.segments = Some(segments);
            }
        }
        f
    }
}

/// Трансформация объекта: позиция и вращение (в градусах)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Transform {
    pub position: [f64; 3],
    pub rotation: [f64; 3],
}

impl Transform {
    pub fn new() -> Self {
        Self {
            position: [0.0, 0.0, 0.0],
            rotation: [0.0, 0.0, 0.0],
        }
    }

    /// Трансформация при создании фигуры: плоскость и тор
    /// кладутся горизонтально (поворот на 90° вокруг X)
    pub fn spawn_for(kind: PrimitiveKind) -> Self {
        let rotation = match kind {
            PrimitiveKind::Plane | PrimitiveKind::Torus => [90.0, 0.0, 0.0],
            _ => [0.0, 0.0, 0.0],
        };
        Self {
            position: [0.0, 0.0, 0.0],
            rotation,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roundtrip<T: Serialize + for<'de> Deserialize<'de> + PartialEq + std::fmt::Debug>(val: &T) {
        let json = serde_json::to_string(val).expect("serialize");
        let back: T = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(*val, back);
    }

    // --- Primitive serde ---

    #[test]
    fn test_primitive_serde_tags() {
        let p = Primitive::Cube {
            width: 2.0,
            height: 3.0,
            depth: 1.5,
        };
        roundtrip(&p);
        let json = serde_json::to_string(&p).unwrap();
        assert!(json.contains(r#""type":"cube""#));

        let p = Primitive::Torus {
            radius: 1.0,
            tube_radius: 0.4,
            segments: 8,
        };
        roundtrip(&p);
        let json = serde_json::to_string(&p).unwrap();
        assert!(json.contains(r#""type":"torus""#));
    }

    // --- PrimitiveKind ---

    #[test]
    fn test_kind_from_str() {
        for kind in PrimitiveKind::ALL {
            let parsed: PrimitiveKind = kind.to_string().parse().unwrap();
            assert_eq!(parsed, kind);
        }
    }

    #[test]
    fn test_kind_from_str_unknown() {
        let err = "pyramid".parse::<PrimitiveKind>().unwrap_err();
        assert_eq!(err, ShapeError::UnknownKind("pyramid".to_string()));
    }

    // --- Defaults ---

    #[test]
    fn test_defaults_per_kind() {
        assert_eq!(
            Primitive::default_for(PrimitiveKind::Cube),
            Primitive::Cube {
                width: 1.0,
                height: 1.0,
                depth: 1.0
            }
        );
        assert_eq!(
            Primitive::default_for(PrimitiveKind::Sphere),
            Primitive::Sphere {
                radius: 1.0,
                segments: 8
            }
        );
        assert_eq!(
            Primitive::default_for(PrimitiveKind::Torus),
            Primitive::Torus {
                radius: 1.0,
                tube_radius: 0.4,
                segments: 8
            }
        );
    }

    #[test]
    fn test_spawn_transform_horizontal_kinds() {
        assert_eq!(
            Transform::spawn_for(PrimitiveKind::Plane).rotation,
            [90.0, 0.0, 0.0]
        );
        assert_eq!(
            Transform::spawn_for(PrimitiveKind::Torus).rotation,
            [90.0, 0.0, 0.0]
        );
        assert_eq!(
            Transform::spawn_for(PrimitiveKind::Cube).rotation,
            [0.0, 0.0, 0.0]
        );
    }

    // --- from_fields ---

    #[test]
    fn test_from_fields_ignores_irrelevant() {
        let mut fields = Primitive::default_for(PrimitiveKind::Cube).fields();
        // Redundant inputs must not affect the result
        fields.radius = Some(99.0);
        fields.segments = Some(64);
        let p = Primitive::from_fields(PrimitiveKind::Cube, &fields).unwrap();
        assert_eq!(p, Primitive::default_for(PrimitiveKind::Cube));
    }

    #[test]
    fn test_from_fields_rejects_nan() {
        let mut fields = Primitive::default_for(PrimitiveKind::Sphere).fields();
        fields.radius = Some(f64::NAN);
        let err = Primitive::from_fields(PrimitiveKind::Sphere, &fields).unwrap_err();
        assert!(matches!(
            err,
            ShapeError::InvalidParameter { field: "radius", .. }
        ));
    }

    #[test]
    fn test_from_fields_rejects_missing() {
        let fields = ShapeFields::default();
        assert!(Primitive::from_fields(PrimitiveKind::Cube, &fields).is_err());
    }

    #[test]
    fn test_from_fields_rejects_nonpositive() {
        let mut fields = Primitive::default_for(PrimitiveKind::Cylinder).fields();
        fields.height = Some(-1.0);
        assert!(Primitive::from_fields(PrimitiveKind::Cylinder, &fields).is_err());
    }

    #[test]
    fn test_fields_clears_inapplicable() {
        let f = Primitive::default_for(PrimitiveKind::Sphere).fields();
        assert!(f.width.is_none());
        assert!(f.depth.is_none());
        assert!(f.tube_radius.is_none());
        assert_eq!(f.radius, Some(1.0));
        assert_eq!(f.segments, Some(8));

        let f = Primitive::default_for(PrimitiveKind::Plane).fields();
        assert!(f.segments.is_none());
        assert!(f.radius.is_none());
        assert_eq!(f.width, Some(1.0));
    }

    #[test]
    fn test_fields_from_fields_roundtrip() {
        for kind in PrimitiveKind::ALL {
            let p = Primitive::default_for(kind);
            let back = Primitive::from_fields(kind, &p.fields()).unwrap();
            assert_eq!(p, back);
        }
    }
}
