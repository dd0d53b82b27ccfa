use super::*;

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-5
}

fn rot_z(angle: f32) -> [[f32; 4]; 4] {
    let (s, c) = angle.sin_cos();
    [
        [c, -s, 0.0, 1.0],
        [s, c, 0.0, 2.0],
        [0.0, 0.0, 1.0, 3.0],
        [0.0, 0.0, 0.0, 1.0],
    ]
}

#[test]
fn row_major_rows_are_copied_verbatim() {
    let m = Matrix4::from_rows(rot_z(0.5), MatrixLayout::RowMajor);
    assert_eq!(m.to_translation(), Vec3::new(1.0, 2.0, 3.0));
    assert!(approx(m.at(1, 0), 0.5f32.sin()));
}

#[test]
fn column_major_is_transposed_into_row_major() {
    let rows = rot_z(0.5);
    let mut cols = [[0.0f32; 4]; 4];
    for i in 0..4 {
        for j in 0..4 {
            cols[j][i] = rows[i][j];
        }
    }
    let a = Matrix4::from_rows(rows, MatrixLayout::RowMajor);
    let b = Matrix4::from_rows(cols, MatrixLayout::ColumnMajor);
    assert_eq!(a, b);
}

#[test]
fn euler_of_pure_yaw_rotation() {
    let m = Matrix4::from_rows(rot_z(0.75), MatrixLayout::RowMajor);
    let e = m.to_euler_xyz();
    assert!(approx(e.roll, 0.0));
    assert!(approx(e.pitch, 0.0));
    assert!(approx(e.yaw, 0.75));
}

#[test]
fn euler_ignores_uniform_scale() {
    let mut rows = rot_z(-0.3);
    for row in rows.iter_mut().take(3) {
        for v in row.iter_mut().take(3) {
            *v *= 4.0;
        }
    }
    let e = Matrix4::from_rows(rows, MatrixLayout::RowMajor).to_euler_xyz();
    assert!(approx(e.yaw, -0.3));
}

#[test]
fn euler_of_roll_rotation() {
    let (s, c) = 0.4f32.sin_cos();
    let rows = [
        [1.0, 0.0, 0.0, 0.0],
        [0.0, c, -s, 0.0],
        [0.0, s, c, 0.0],
        [0.0, 0.0, 0.0, 1.0],
    ];
    let e = Matrix4::from_rows(rows, MatrixLayout::RowMajor).to_euler_xyz();
    assert!(approx(e.roll, 0.4));
    assert!(approx(e.pitch, 0.0));
    assert!(approx(e.yaw, 0.0));
}

#[test]
fn identity_and_translation_helpers() {
    assert!(Matrix4::IDENTITY.is_finite());
    let t = Matrix4::translation(4.0, 5.0, 6.0);
    assert_eq!(t.to_translation(), Vec3::new(4.0, 5.0, 6.0));
    assert_eq!(Matrix4::default(), Matrix4::IDENTITY);
}
