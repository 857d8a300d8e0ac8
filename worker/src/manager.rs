use crate::cache::SliceCache;
use crate::error::{Result, WorkerError};
use crate::protocol::{Reply, Request};
use crate::worker;
use mpr_model::Volume;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread::JoinHandle;
use tracing::{debug, warn};

/// Main-context handle to a dedicated MIP worker thread: owns the channel ends and the
/// worker's lifecycle, one thread per active volume.
pub struct MipWorkerHandle {
    request_tx: Sender<Request>,
    reply_rx: Receiver<Reply>,
    thread: Option<JoinHandle<()>>,
    cache: SliceCache,
    next_request_id: u64,
}

impl MipWorkerHandle {
    /// Spawns the worker thread and sends the initial `init` message, blocking for `ready`.
    pub fn new(volume: Volume) -> Self {
        let (request_tx, request_rx) = mpsc::channel();
        let (reply_tx, reply_rx) = mpsc::channel();
        let thread = std::thread::spawn(move || worker::run(request_rx, reply_tx));

        let mut handle = Self {
            request_tx,
            reply_rx,
            thread: Some(thread),
            cache: SliceCache::new(),
            next_request_id: 0,
        };
        handle.send_init(volume);
        handle
    }

    fn send_init(&mut self, volume: Volume) {
        let dims = volume.dimensions();
        let _ = self.request_tx.send(Request::Init { volume: Box::new(volume) });
        match self.reply_rx.recv() {
            Ok(Reply::Ready) => debug!("worker ready for volume {:?}", dims),
            other => warn!("expected Ready after init, got {:?}", other),
        }
    }

    /// Re-initializes the worker with a new volume: clears the cache and drains any replies
    /// still in flight from the previous volume before sending the new `init`, since those
    /// replies belong to slices that no longer exist.
    pub fn init(&mut self, volume: Volume) {
        self.cache.clear();
        let mut drained = 0;
        while self.reply_rx.try_recv().is_ok() {
            drained += 1;
        }
        if drained > 0 {
            debug!("discarded {drained} stale replies as cancelled on volume change");
        }
        self.send_init(volume);
    }

    fn allocate_request_id(&mut self) -> u64 {
        let id = self.next_request_id;
        self.next_request_id += 1;
        id
    }

    /// Computes the axial MIP slab centered at `z` with the given half-thickness. Returns the
    /// cached buffer synchronously without touching the worker thread when already cached.
    pub fn compute_slice(&mut self, z: usize, slab_half_size: usize) -> Result<Vec<i16>> {
        if let Some(cached) = self.cache.get(z, slab_half_size) {
            return Ok(cached.to_vec());
        }

        let request_id = self.allocate_request_id();
        self.request_tx
            .send(Request::ComputeSlice { z, slab_half_size, request_id })
            .map_err(|_| WorkerError::Cancelled)?;

        loop {
            match self.reply_rx.recv() {
                Ok(Reply::SliceResult { z: rz, slab_half_size: rs, request_id: rid, bytes }) => {
                    self.cache.insert(rz, rs, bytes.clone());
                    if rid == request_id {
                        return Ok(bytes);
                    }
                }
                Ok(Reply::Error { request_id: rid, message }) if rid == Some(request_id) => {
                    return Err(WorkerError::InternalError { message });
                }
                Ok(Reply::NotInitialized { request_id: rid }) if rid == request_id => {
                    return Err(WorkerError::NotInitialized);
                }
                Ok(_) => continue,
                Err(_) => return Err(WorkerError::Cancelled),
            }
        }
    }

    /// Fire-and-forget batch request; results stream back via [`Self::drain_ready_results`].
    pub fn compute_batch(&mut self, indices: Vec<usize>, slab_half_size: usize) -> Result<()> {
        let request_id = self.allocate_request_id();
        self.request_tx
            .send(Request::ComputeBatch { indices, slab_half_size, request_id })
            .map_err(|_| WorkerError::Cancelled)
    }

    /// Non-blocking drain of any `sliceResult`/`error` replies currently queued, caching
    /// successful ones. Used after [`Self::compute_batch`] and after prefetch.
    pub fn drain_ready_results(&mut self) -> Vec<(usize, usize, Vec<i16>)> {
        let mut drained = Vec::new();
        while let Ok(reply) = self.reply_rx.try_recv() {
            match reply {
                Reply::SliceResult { z, slab_half_size, bytes, .. } => {
                    self.cache.insert(z, slab_half_size, bytes.clone());
                    drained.push((z, slab_half_size, bytes));
                }
                Reply::Error { message, .. } => warn!("worker reported error: {message}"),
                Reply::NotInitialized { .. } => warn!("worker received a request before init"),
                Reply::Ready => {}
            }
        }
        drained
    }

    /// Enqueues a prefetch batch around `z0` with a superior-bias ordering: for `d` in
    /// `1..=radius`, `z0+d` then `z0-d`, skipping out-of-range and already-cached slices.
    pub fn prefetch_around_cursor(&mut self, z0: usize, radius: usize, total_slices: usize, slab_half_size: usize) -> Result<()> {
        let mut indices = Vec::new();
        for d in 1..=radius {
            if let Some(above) = z0.checked_add(d) {
                if above < total_slices && !self.cache.contains(above, slab_half_size) {
                    indices.push(above);
                }
            }
            if d <= z0 {
                let below = z0 - d;
                if !self.cache.contains(below, slab_half_size) {
                    indices.push(below);
                }
            }
        }
        if indices.is_empty() {
            return Ok(());
        }
        self.compute_batch(indices, slab_half_size)
    }
}

impl Drop for MipWorkerHandle {
    fn drop(&mut self) {
        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mpr_model::{Orientation, VolumeBuilder};
    use nalgebra::Vector3;

    fn identity_orientation() -> Orientation {
        Orientation {
            row_dir: Vector3::new(1.0, 0.0, 0.0),
            col_dir: Vector3::new(0.0, 1.0, 0.0),
            slice_dir: Vector3::new(0.0, 0.0, 1.0),
        }
    }

    fn s7_volume() -> Volume {
        VolumeBuilder::default()
            .cols(2usize)
            .rows(2usize)
            .slices(3usize)
            .spacing((1.0, 1.0, 1.0))
            .origin(Vector3::new(0.0, 0.0, 0.0))
            .orientation(identity_orientation())
            .data(vec![0, 0, 0, 0, 5, 5, 5, 5, 1, 1, 1, 1])
            .window_center(0.0)
            .window_width(400.0)
            .min_hu(0)
            .max_hu(5)
            .build()
            .unwrap()
    }

    #[test]
    fn s7_compute_slice_axial_mip() {
        let mut handle = MipWorkerHandle::new(s7_volume());
        let result = handle.compute_slice(1, 1).unwrap();
        assert_eq!(result, vec![5, 5, 5, 5]);
    }

    #[test]
    fn property_7_second_call_hits_cache_with_identical_bytes() {
        let mut handle = MipWorkerHandle::new(s7_volume());
        let first = handle.compute_slice(1, 1).unwrap();
        let second = handle.compute_slice(1, 1).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn init_clears_cache_across_volume_switch() {
        let mut handle = MipWorkerHandle::new(s7_volume());
        handle.compute_slice(1, 1).unwrap();
        assert!(handle.cache.contains(1, 1));
        handle.init(s7_volume());
        assert!(!handle.cache.contains(1, 1));
    }

    #[test]
    fn prefetch_skips_out_of_range_and_cached() {
        let mut handle = MipWorkerHandle::new(s7_volume());
        handle.compute_slice(1, 0).unwrap();
        handle.prefetch_around_cursor(1, 2, 3, 0).unwrap();
        std::thread::sleep(std::time::Duration::from_millis(50));
        let drained = handle.drain_ready_results();
        assert!(drained.iter().all(|(z, _, _)| *z != 1));
        assert!(drained.iter().all(|(z, _, _)| *z < 3));
    }

    #[test]
    fn out_of_range_slice_reports_internal_error() {
        let mut handle = MipWorkerHandle::new(s7_volume());
        let err = handle.compute_slice(99, 0).unwrap_err();
        assert!(matches!(err, WorkerError::InternalError { .. }));
    }
}
