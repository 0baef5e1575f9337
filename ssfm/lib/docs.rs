//! Theoretical background.
//!
//! # Contents
//! - [Background](#background)
//! - [Units](#units)
//! - [Split-step method](#split-step-method)
//! - [Imaginary time](#imaginary-time)
//! - [Nonlinear terms](#nonlinear-terms)
//! - [Energy](#energy)
//!
//! # Background
//! The time-dependent Schrödinger equation for a particle moving in one
//! dimension under a conservative potential *V*(*x*) reads
//! ```text
//!   ∂ψ      ħ² ∂²ψ
//! i ħ -- = - --- ---- + V(x) ψ
//!   ∂t      2 m ∂x²
//! ```
//! Its solution over a time step *dt* is formally ψ(*t* + *dt*) = exp(-*i* *H*
//! *dt* / *ħ*) ψ(*t*), with *H* = *H*<sub>*k*</sub> + *H*<sub>*v*</sub> the sum
//! of a kinetic part, diagonal in momentum space, and a potential part,
//! diagonal in position space. Neither representation diagonalizes both, which
//! is what the split-step method works around.
//!
//! Here the wavefunction is sampled on *N* (even) points of a box of width 2
//! *x*<sub>max</sub>,
//! ```text
//! dx   = 2 xmax / N
//! x[j] = -xmax + dx/2 + j dx,    j ∊ {0, ..., N - 1}
//! ```
//! Moving to momentum space with the discrete Fourier transform implicitly
//! makes the box periodic. The conjugate grid has spacing *dk* = π /
//! *x*<sub>max</sub> and is kept in the unshifted order produced by the FFT:
//! ```text
//! k = [0, dk, ..., (N/2 - 1) dk, -(N/2) dk, ..., -dk]
//! ```
//!
//! # Units
//! Everything in this crate works in natural units with *ħ* = *m* = 1, so that
//! ```text
//!   ∂ψ     1 ∂²ψ
//! i -- = - - ---- + V(x) ψ
//!   ∂t     2 ∂x²
//!
//! H_k = ½ k²
//! H_v = V
//! ```
//! With *V* = ½ *x*², the harmonic oscillator has level spacing 1 and ground
//! state energy ½, with ground state ψ₀ ∝ exp(-*x*²/2).
//!
//! # Split-step method
//! Using the Baker-Campbell-Hausdorff formula, splitting the exponential
//! naively into a potential factor and a kinetic factor leaves an *O*(*dt*²)
//! error from the \[*H*<sub>*v*</sub>, *H*<sub>*k*</sub>\] commutator.
//! Sandwiching the kinetic step between two half-sized potential steps pushes
//! the error to *O*(*dt*³) per step:
//! ```text
//!               -i H_v dt/2  -i H_k dt  -i H_v dt/2
//! ψ(t + dt) = [e            e          e           ] ψ(t) + O(dt³)
//! ```
//! Each factor is applied by pointwise multiplication in the representation
//! where it is diagonal, with the FFT moving between them:
//! ```text
//!        ψ(t, x)
//!           |
//!           V
//!     -i V(x) dt/2
//!    e
//!           |
//!           '--> FFT ---.
//!                       |
//!                       V
//!                 -i k² dt/2
//!                e
//!                       |
//!           .-- iFFT <--'
//!           |
//!           V
//!     -i V(x) dt/2
//!    e
//!           |
//!           V
//!     ψ(t + dt, x)
//! ```
//! In real time every factor has unit modulus and the FFT pair is unitary (up
//! to its fixed normalization), so the total probability Σ |ψ|² *dx* is
//! conserved to rounding error.
//!
//! # Imaginary time
//! Substituting *t* → -*i* *t* turns every phase into a decaying exponential:
//! ```text
//!  -i θ      -θ
//! e      →  e
//! ```
//! Expanding a state in eigenstates of *H*, each component then decays as
//! exp(-*E*<sub>*n*</sub> *t*), so after renormalizing to unit probability
//! every step, all but the lowest-energy component are suppressed relative to
//! it at rate exp(-(*E*<sub>*n*</sub> - *E*<sub>0</sub>) *t*). The state
//! converges to the ground state of the potential provided it has nonzero
//! overlap with it. A run never stops on its own; convergence is judged from
//! the trend of the energy over the recorded snapshots.
//!
//! If the total probability ever reaches zero, the state cannot be
//! renormalized and the run fails.
//!
//! # Nonlinear terms
//! Nonlinear Schrödinger equations add a term depending on the local amplitude,
//! ```text
//!   ∂ψ     1 ∂²ψ
//! i -- = - - ---- + V ψ - N(|ψ|, t) ψ
//!   ∂t     2 ∂x²
//! ```
//! which is still diagonal in position space and so is folded into the
//! potential factor as an effective potential *W* = *V* - *N*. Because *N*
//! depends on ψ, *W* changes from step to step; it is evaluated once from the
//! field at the start of each step and used for both half-steps. *W* may be
//! complex: in real time its imaginary part acts as a local gain (positive) or
//! loss (negative), since |exp(-*i* (*a* + *i* *b*) *dt*/2)| = exp(*b* *dt*/2).
//! Examples are
//! the competing power laws
//! ```text
//! N = -2 (p + 1) |ψ|^(p + 1) + α (q + 1) |ψ|^(q + 1)
//! ```
//! and a periodically modulated gain with cubic self-interaction,
//! ```text
//! N = -γ₁ (1 + ε sin(ω t)) |ψ| + γ₂ |ψ|²
//! ```
//!
//! # Energy
//! The energy of a snapshot uses the same machinery as the propagation:
//! ```text
//! E = ⟨ψ|H|ψ⟩ = dx Re Σ [ ½ conj(ψ) iFFT[k² FFT[ψ]] + conj(ψ) V ψ ]
//! ```
//! For a normalized state this is bounded below by the ground state energy,
//! which makes it a convenient convergence diagnostic for imaginary-time runs.
