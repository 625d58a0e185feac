//! Two-qubit unitary synthesis by two-level (Givens) reduction.
//!
//! The matrix is reduced to a diagonal by rotations between basis states
//! adjacent in Gray-code order (00, 01, 11, 10), so every rotation acts on
//! states differing in a single bit and becomes a controlled single-qubit
//! gate. Each controlled gate costs two CX; the leftover diagonal costs
//! two more. The result is exact up to global phase.

use ndarray::Array2;
use num_complex::Complex64;

use qsyc_ir::{GridQubit, Operation, StandardGate, Unitary};

use crate::error::{CompileError, CompileResult};
use crate::unitary::{Unitary2x2, normalize_angle};

/// Basis indices in Gray-code order.
const GRAY: [usize; 4] = [0b00, 0b01, 0b11, 0b10];

/// Entries below this magnitude are already eliminated.
const ZERO_TOL: f64 = 1e-12;

/// A recorded elimination: rotation `g` applied to rows `lo` and `hi`.
struct Givens {
    lo: usize,
    hi: usize,
    g: [Complex64; 4],
}

/// Synthesize a two-qubit unitary on (`q0`, `q1`), `q0` most significant.
///
/// Output gates are standard gates (CX, P, Ry, Rz, X) in time order; the
/// converter lowers them further. Rotations below `atol` are omitted.
pub fn synthesize_two_qubit(
    matrix: &Unitary,
    q0: GridQubit,
    q1: GridQubit,
    atol: f64,
) -> CompileResult<Vec<Operation>> {
    if matrix.num_qubits() != 2 {
        return Err(CompileError::unsupported(
            "matrix",
            format!(
                "two-qubit synthesis got a {}-qubit matrix",
                matrix.num_qubits()
            ),
        ));
    }

    let mut w: Array2<Complex64> = matrix.as_array().clone();
    let mut rotations = Vec::new();

    for p in 0..3 {
        let col = GRAY[p];
        for k in (p + 1..4).rev() {
            let (lo, hi) = (GRAY[k - 1], GRAY[k]);
            let a = w[[lo, col]];
            let b = w[[hi, col]];
            if b.norm() < ZERO_TOL {
                continue;
            }
            let n = (a.norm_sqr() + b.norm_sqr()).sqrt();
            let g = [a.conj() / n, b.conj() / n, -b / n, a / n];
            for j in 0..4 {
                let (x, y) = (w[[lo, j]], w[[hi, j]]);
                w[[lo, j]] = g[0] * x + g[1] * y;
                w[[hi, j]] = g[2] * x + g[3] * y;
            }
            rotations.push(Givens { lo, hi, g });
        }
    }

    // U = G1† ... Gm† · D, so D runs first and the daggers in reverse order.
    let qubits = [q0, q1];
    let mut ops = diagonal_ops(
        [w[[0, 0]], w[[1, 1]], w[[2, 2]], w[[3, 3]]],
        q0,
        q1,
        atol,
    )?;
    for rot in rotations.iter().rev() {
        ops.extend(two_level_ops(rot, qubits, atol)?);
    }
    Ok(ops)
}

/// Bit of qubit `k` (0 = most significant) in basis index `r`.
fn bit(r: usize, k: usize) -> usize {
    (r >> (1 - k)) & 1
}

/// Operations applying the dagger of a recorded rotation.
fn two_level_ops(
    rot: &Givens,
    qubits: [GridQubit; 2],
    atol: f64,
) -> CompileResult<Vec<Operation>> {
    let [g00, g01, g10, g11] = rot.g;
    let block = [g00.conj(), g10.conj(), g01.conj(), g11.conj()];

    let target = if bit(rot.lo, 0) != bit(rot.hi, 0) { 0 } else { 1 };
    let control = 1 - target;
    let control_value = bit(rot.lo, control);

    // `block` acts on (lo, hi); reorder when `lo` has the target bit set.
    let [b00, b01, b10, b11] = block;
    let v = if bit(rot.lo, target) == 0 {
        Unitary2x2::new(b00, b01, b10, b11)
    } else {
        Unitary2x2::new(b11, b10, b01, b00)
    };

    let (c, t) = (qubits[control], qubits[target]);
    let mut ops = Vec::new();
    if control_value == 0 {
        ops.push(Operation::single(StandardGate::X, c)?);
    }
    ops.extend(controlled_ops(&v, c, t, atol)?);
    if control_value == 0 {
        ops.push(Operation::single(StandardGate::X, c)?);
    }
    Ok(ops)
}

/// Controlled-V from two CX and single-qubit rotations.
///
/// With V = e^{iα}·Rz(β)·Ry(γ)·Rz(δ): C = Rz((δ-β)/2), B = Ry(-γ/2)·Rz(-(δ+β)/2),
/// A = Rz(β)·Ry(γ/2), and controlled-V = P(α)_c · A · CX · B · CX · C.
fn controlled_ops(
    v: &Unitary2x2,
    control: GridQubit,
    target: GridQubit,
    atol: f64,
) -> CompileResult<Vec<Operation>> {
    let (beta, gamma, delta, alpha) = v.zyz_decomposition();
    let mut ops = Vec::with_capacity(8);

    push_rotation(&mut ops, StandardGate::Rz((delta - beta) / 2.0), target, atol)?;
    ops.push(Operation::pair(StandardGate::CX, control, target)?);
    push_rotation(&mut ops, StandardGate::Rz(-(delta + beta) / 2.0), target, atol)?;
    push_rotation(&mut ops, StandardGate::Ry(-gamma / 2.0), target, atol)?;
    ops.push(Operation::pair(StandardGate::CX, control, target)?);
    push_rotation(&mut ops, StandardGate::Ry(gamma / 2.0), target, atol)?;
    push_rotation(&mut ops, StandardGate::Rz(beta), target, atol)?;
    push_rotation(&mut ops, StandardGate::P(alpha), control, atol)?;
    Ok(ops)
}

/// Append a rotation unless all of its angles are below `atol`.
fn push_rotation(
    ops: &mut Vec<Operation>,
    gate: StandardGate,
    qubit: GridQubit,
    atol: f64,
) -> CompileResult<()> {
    if gate.parameters().iter().any(|angle| angle.abs() > atol) {
        ops.push(Operation::single(gate, qubit)?);
    }
    Ok(())
}

/// diag(e^{iθ0}, e^{iθ1}, e^{iθ2}, e^{iθ3}) up to global phase.
fn diagonal_ops(
    diag: [Complex64; 4],
    q0: GridQubit,
    q1: GridQubit,
    atol: f64,
) -> CompileResult<Vec<Operation>> {
    let theta0 = diag[0].arg();
    let a = diag[1].arg() - theta0;
    let b = diag[2].arg() - theta0;
    let c = diag[3].arg() - theta0;
    let cp = normalize_angle(c - a - b);

    let mut ops = Vec::new();
    push_rotation(&mut ops, StandardGate::P(normalize_angle(a)), q1, atol)?;
    push_rotation(&mut ops, StandardGate::P(normalize_angle(b)), q0, atol)?;
    if cp.abs() > atol {
        // Controlled phase: P(λ/2) on both, CX, P(-λ/2) on target, CX.
        ops.push(Operation::single(StandardGate::P(cp / 2.0), q0)?);
        ops.push(Operation::pair(StandardGate::CX, q0, q1)?);
        ops.push(Operation::single(StandardGate::P(-cp / 2.0), q1)?);
        ops.push(Operation::pair(StandardGate::CX, q0, q1)?);
        ops.push(Operation::single(StandardGate::P(cp / 2.0), q1)?);
    }
    Ok(ops)
}
