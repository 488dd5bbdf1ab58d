//! Derives the facelet permutation of every quarter turn from sticker
//! positions on a 3x3x3 lattice centred at the origin.

use crate::{
    domain::{Direction, Face},
    model::{FACELETS_PER_FACE, FACELET_COUNT},
};

type Vec3 = [i8; 3];

/// Outward normal plus the in-plane axes a viewer facing the face sees as
/// "right" and "down". Sticker `row * 3 + col` sits at
/// `normal + (col - 1) * right + (row - 1) * down`.
struct FaceFrame {
    normal: Vec3,
    right: Vec3,
    down: Vec3,
}

const fn frame(face: Face) -> FaceFrame {
    match face {
        Face::Front => FaceFrame {
            normal: [0, 0, 1],
            right: [1, 0, 0],
            down: [0, -1, 0],
        },
        Face::Back => FaceFrame {
            normal: [0, 0, -1],
            right: [-1, 0, 0],
            down: [0, -1, 0],
        },
        Face::Top => FaceFrame {
            normal: [0, 1, 0],
            right: [1, 0, 0],
            down: [0, 0, 1],
        },
        Face::Down => FaceFrame {
            normal: [0, -1, 0],
            right: [1, 0, 0],
            down: [0, 0, -1],
        },
        Face::Left => FaceFrame {
            normal: [-1, 0, 0],
            right: [0, 0, 1],
            down: [0, -1, 0],
        },
        Face::Right => FaceFrame {
            normal: [1, 0, 0],
            right: [0, 0, -1],
            down: [0, -1, 0],
        },
    }
}

fn dot(a: Vec3, b: Vec3) -> i8 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
}

fn cross(a: Vec3, b: Vec3) -> Vec3 {
    [
        a[1] * b[2] - a[2] * b[1],
        a[2] * b[0] - a[0] * b[2],
        a[0] * b[1] - a[1] * b[0],
    ]
}

fn add(a: Vec3, b: Vec3) -> Vec3 {
    [a[0] + b[0], a[1] + b[1], a[2] + b[2]]
}

fn scale(a: Vec3, k: i8) -> Vec3 {
    [a[0] * k, a[1] * k, a[2] * k]
}

fn sticker(index: usize) -> (Vec3, Vec3) {
    let face = Face::ALL[index / FACELETS_PER_FACE];
    let cell = index % FACELETS_PER_FACE;
    let row = (cell / 3) as i8 - 1;
    let col = (cell % 3) as i8 - 1;
    let f = frame(face);
    let position = add(f.normal, add(scale(f.right, col), scale(f.down, row)));
    (position, f.normal)
}

fn locate(position: Vec3, normal: Vec3) -> usize {
    let face = Face::ALL
        .into_iter()
        .find(|face| frame(*face).normal == normal)
        .unwrap_or_else(|| unreachable!("rotations map unit normals onto unit normals"));
    let f = frame(face);
    let offset = add(position, scale(f.normal, -1));
    let col = (dot(offset, f.right) + 1) as usize;
    let row = (dot(offset, f.down) + 1) as usize;
    face.index() * FACELETS_PER_FACE + row * 3 + col
}

fn rotate(v: Vec3, axis: Vec3, direction: Direction) -> Vec3 {
    let along = scale(axis, dot(axis, v));
    let across = cross(axis, v);
    match direction {
        Direction::Clockwise => add(along, scale(across, -1)),
        Direction::CounterClockwise => add(along, across),
    }
}

/// `perm[target] = source`: after the turn, facelet `target` holds what
/// facelet `source` held before.
pub(crate) fn turn_permutation(face: Face, direction: Direction) -> [u8; FACELET_COUNT] {
    let axis = frame(face).normal;
    let mut perm = [0u8; FACELET_COUNT];
    for (index, slot) in perm.iter_mut().enumerate() {
        *slot = index as u8;
    }
    for source in 0..FACELET_COUNT {
        let (position, normal) = sticker(source);
        if dot(position, axis) != 1 {
            continue;
        }
        let target = locate(rotate(position, axis, direction), rotate(normal, axis, direction));
        perm[target] = source as u8;
    }
    perm
}
