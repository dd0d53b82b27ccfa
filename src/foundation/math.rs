use crate::foundation::core::Vec3;
use serde::{Deserialize, Serialize};

/// Memory order of a 4x4 matrix as delivered by the host.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatrixLayout {
    /// `m[row][col]`, translation in the last column.
    #[default]
    RowMajor,
    /// `m[col][row]`, translation in the last row.
    ColumnMajor,
}

/// Row-major 4x4 transform, the single convention handed to the render engine.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Matrix4 {
    pub mtx: [f32; 16],
}

impl Default for Matrix4 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Euler rotation in radians, XYZ order.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct EulerXyz {
    pub roll: f32,
    pub pitch: f32,
    pub yaw: f32,
}

impl Matrix4 {
    pub const IDENTITY: Self = Self {
        mtx: [
            1.0, 0.0, 0.0, 0.0, //
            0.0, 1.0, 0.0, 0.0, //
            0.0, 0.0, 1.0, 0.0, //
            0.0, 0.0, 0.0, 1.0,
        ],
    };

    /// Normalize host rows into row-major order.
    pub fn from_rows(rows: [[f32; 4]; 4], layout: MatrixLayout) -> Self {
        let mut mtx = [0.0f32; 16];
        for (i, row) in rows.iter().enumerate() {
            for (j, v) in row.iter().enumerate() {
                match layout {
                    MatrixLayout::RowMajor => mtx[i * 4 + j] = *v,
                    MatrixLayout::ColumnMajor => mtx[j * 4 + i] = *v,
                }
            }
        }
        Self { mtx }
    }

    pub fn translation(x: f32, y: f32, z: f32) -> Self {
        let mut m = Self::IDENTITY;
        m.mtx[3] = x;
        m.mtx[7] = y;
        m.mtx[11] = z;
        m
    }

    pub fn at(&self, row: usize, col: usize) -> f32 {
        self.mtx[row * 4 + col]
    }

    pub fn is_finite(&self) -> bool {
        self.mtx.iter().all(|v| v.is_finite())
    }

    pub fn to_translation(&self) -> Vec3 {
        Vec3::new(self.at(0, 3), self.at(1, 3), self.at(2, 3))
    }

    /// Extract the XYZ euler rotation of the upper 3x3, ignoring scale.
    pub fn to_euler_xyz(&self) -> EulerXyz {
        let mut r = [[0.0f32; 3]; 3];
        for col in 0..3 {
            let len = (0..3)
                .map(|row| self.at(row, col) * self.at(row, col))
                .sum::<f32>()
                .sqrt();
            let inv = if len > f32::EPSILON { 1.0 / len } else { 0.0 };
            for (row, r_row) in r.iter_mut().enumerate() {
                r_row[col] = self.at(row, col) * inv;
            }
        }

        let cy = (r[0][0] * r[0][0] + r[1][0] * r[1][0]).sqrt();
        if cy > 16.0 * f32::EPSILON {
            EulerXyz {
                roll: r[2][1].atan2(r[2][2]),
                pitch: (-r[2][0]).atan2(cy),
                yaw: r[1][0].atan2(r[0][0]),
            }
        } else {
            // Gimbal lock: yaw folds into roll.
            EulerXyz {
                roll: (-r[1][2]).atan2(r[1][1]),
                pitch: (-r[2][0]).atan2(cy),
                yaw: 0.0,
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
