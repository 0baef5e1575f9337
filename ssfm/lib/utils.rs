//! Spectral transforms and miscellaneous wavefunction tools.

use std::{ fmt, sync::Arc };
use ndarray::{ self as nd, Ix1, concatenate };
use num_complex::Complex64 as C64;
use num_traits::Zero;
use rustfft::{ self as fft, Fft };

/// Planned forward and inverse one-dimensional, complex-valued FFTs for a fixed
/// transform length.
///
/// The inverse transform carries the `1/n` normalization, so that
/// `inverse(forward(q)) == q` up to rounding. Plans are shared behind [`Arc`]s,
/// so cloning is cheap.
///
/// *All methods panic if handed an array whose length differs from the
/// planned length.*
#[derive(Clone)]
pub struct Transform {
    n: usize,
    forward: Arc<dyn Fft<f64>>,
    inverse: Arc<dyn Fft<f64>>,
}

impl fmt::Debug for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Transform").field("n", &self.n).finish()
    }
}

impl Transform {
    /// Plan both transforms for arrays of length `n`.
    pub fn new(n: usize) -> Self {
        let mut planner = fft::FftPlanner::new();
        let forward = planner.plan_fft_forward(n);
        let inverse = planner.plan_fft_inverse(n);
        Self { n, forward, inverse }
    }

    /// Return the planned transform length.
    pub fn len(&self) -> usize { self.n }

    /// Return `true` if the planned transform length is zero.
    pub fn is_empty(&self) -> bool { self.n == 0 }

    /// Perform the forward FFT in place.
    pub fn forward_inplace<S>(&self, q: &mut nd::ArrayBase<S, Ix1>)
    where S: nd::DataMut<Elem = C64>
    {
        process(self.forward.as_ref(), q);
    }

    /// Perform the (normalized) inverse FFT in place.
    pub fn inverse_inplace<S>(&self, q: &mut nd::ArrayBase<S, Ix1>)
    where S: nd::DataMut<Elem = C64>
    {
        process(self.inverse.as_ref(), q);
        let n = self.n as f64;
        q.map_inplace(|qk| { *qk /= n; });
    }

    /// Perform the forward FFT.
    pub fn forward<S>(&self, q: &nd::ArrayBase<S, Ix1>) -> nd::Array1<C64>
    where S: nd::Data<Elem = C64>
    {
        let mut f = q.to_owned();
        self.forward_inplace(&mut f);
        f
    }

    /// Perform the (normalized) inverse FFT.
    pub fn inverse<S>(&self, f: &nd::ArrayBase<S, Ix1>) -> nd::Array1<C64>
    where S: nd::Data<Elem = C64>
    {
        let mut q = f.to_owned();
        self.inverse_inplace(&mut q);
        q
    }
}

// run a plan over an array, going through a contiguous buffer if the array's
// memory layout doesn't already provide one
fn process<S>(plan: &dyn Fft<f64>, q: &mut nd::ArrayBase<S, Ix1>)
where S: nd::DataMut<Elem = C64>
{
    if let Some(buf) = q.as_slice_mut() {
        plan.process(buf);
        return;
    }
    let mut buf: Vec<C64> = q.iter().copied().collect();
    plan.process(&mut buf);
    q.iter_mut().zip(buf)
        .for_each(|(qk, bk)| { *qk = bk; });
}

/// Perform the one-dimensional, complex-valued FFT.
///
/// This plans a fresh transform on every call; prefer [`Transform`] for
/// repeated use.
pub fn fft<S>(x: &nd::ArrayBase<S, Ix1>) -> nd::Array1<C64>
where S: nd::Data<Elem = C64>
{
    Transform::new(x.len()).forward(x)
}

/// Perform the one-dimensional, complex-valued inverse FFT.
///
/// This plans a fresh transform on every call; prefer [`Transform`] for
/// repeated use.
pub fn ifft<S>(f: &nd::ArrayBase<S, Ix1>) -> nd::Array1<C64>
where S: nd::Data<Elem = C64>
{
    Transform::new(f.len()).inverse(f)
}

/// Generate an array of angular wavenumbers with spacing `dk` in unshifted
/// FFT order, i.e. non-negative wavenumbers in ascending order followed by
/// negative wavenumbers ascending toward zero.
///
/// For even `n`, the element at index `n / 2` holds the most negative value,
/// `-(n / 2) * dk`.
pub fn fft_wavenumbers(n: usize, dk: f64) -> nd::Array1<f64> {
    let m = if n % 2 == 0 { n / 2 } else { (n + 1) / 2 };
    let kp: nd::Array1<f64>
        = (0..m)
        .map(|j| j as f64 * dk)
        .collect();
    let km: nd::Array1<f64>
        = (1..n - m + 1).rev()
        .map(|j| -(j as f64) * dk)
        .collect();
    concatenate!(nd::Axis(0), kp, km)
}

/// Compute the pointwise probability density `|q|²`.
pub fn density<S>(q: &nd::ArrayBase<S, Ix1>) -> nd::Array1<f64>
where S: nd::Data<Elem = C64>
{
    q.mapv(|qk| qk.norm_sqr())
}

/// Calculate the total probability `Σ |q|² dx` of a wavefunction sampled over
/// a periodic grid.
pub fn wf_norm<S>(q: &nd::ArrayBase<S, Ix1>, dx: f64) -> f64
where S: nd::Data<Elem = C64>
{
    q.iter().map(|qk| qk.norm_sqr()).sum::<f64>() * dx
}

/// Calculate the inner product `Σ conj(q) p dx` of two wavefunctions sampled
/// over the same periodic grid.
///
/// Extra elements in the longer array are ignored.
pub fn wf_dot<S, T>(
    q: &nd::ArrayBase<S, Ix1>,
    p: &nd::ArrayBase<T, Ix1>,
    dx: f64,
) -> C64
where
    S: nd::Data<Elem = C64>,
    T: nd::Data<Elem = C64>,
{
    q.iter().zip(p)
        .fold(C64::zero(), |acc, (qk, pk)| acc + qk.conj() * pk)
        * dx
}

/// Return a copy of a wavefunction scaled to unit total probability.
///
/// A wavefunction with zero norm is returned unchanged.
pub fn wf_normalized<S>(q: &nd::ArrayBase<S, Ix1>, dx: f64)
    -> nd::Array1<C64>
where S: nd::Data<Elem = C64>
{
    let norm = wf_norm(q, dx).sqrt();
    if norm > 0.0 { q.mapv(|qk| qk / norm) } else { q.to_owned() }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn wavenumbers_even() {
        let k = fft_wavenumbers(6, 0.5);
        assert_eq!(k.to_vec(), vec![0.0, 0.5, 1.0, -1.5, -1.0, -0.5]);
    }

    #[test]
    fn wavenumbers_odd() {
        let k = fft_wavenumbers(5, 1.0);
        assert_eq!(k.to_vec(), vec![0.0, 1.0, 2.0, -2.0, -1.0]);
    }

    #[test]
    fn transform_round_trip() {
        let q: nd::Array1<C64>
            = (0..64)
            .map(|j| {
                let x = j as f64 / 8.0;
                C64::new(x.sin() + 0.25 * x, (3.0 * x).cos())
            })
            .collect();
        let tr = Transform::new(q.len());
        let back = tr.inverse(&tr.forward(&q));
        q.iter().zip(&back)
            .for_each(|(qk, bk)| { assert_abs_diff_eq!((qk - bk).norm(), 0.0, epsilon = 1e-12); });
    }

    #[test]
    fn transform_strided_view() {
        // every other element of a longer array is not contiguous
        let long: nd::Array1<C64>
            = (0..32).map(|j| C64::new(j as f64, -(j as f64))).collect();
        let mut strided = long.clone();
        let mut view = strided.slice_mut(nd::s![..;2]);
        let tr = Transform::new(16);
        let expected = tr.forward(&long.slice(nd::s![..;2]).to_owned());
        tr.forward_inplace(&mut view);
        view.iter().zip(&expected)
            .for_each(|(vk, ek)| { assert_abs_diff_eq!((vk - ek).norm(), 0.0, epsilon = 1e-9); });
    }

    #[test]
    fn fft_of_constant_is_delta() {
        let q: nd::Array1<C64> = nd::Array1::from_elem(8, C64::from(1.0));
        let f = fft(&q);
        assert_abs_diff_eq!(f[0].re, 8.0, epsilon = 1e-12);
        f.iter().skip(1)
            .for_each(|fk| { assert_abs_diff_eq!(fk.norm(), 0.0, epsilon = 1e-12); });
        let back = ifft(&f);
        back.iter()
            .for_each(|bk| { assert_abs_diff_eq!((*bk - 1.0).norm(), 0.0, epsilon = 1e-12); });
    }

    #[test]
    fn norm_and_dot() {
        let q: nd::Array1<C64> = nd::array![C64::new(1.0, 1.0), C64::new(0.0, 2.0)];
        assert_abs_diff_eq!(wf_norm(&q, 0.5), 3.0, epsilon = 1e-15);
        let qn = wf_normalized(&q, 0.5);
        assert_abs_diff_eq!(wf_norm(&qn, 0.5), 1.0, epsilon = 1e-15);
        let d = wf_dot(&q, &q, 0.5);
        assert_abs_diff_eq!(d.re, 3.0, epsilon = 1e-15);
        assert_abs_diff_eq!(d.im, 0.0, epsilon = 1e-15);
        assert_eq!(density(&q).to_vec(), vec![2.0, 4.0]);
    }
}
