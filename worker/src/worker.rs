use crate::protocol::{Reply, Request};
use mpr_model::{Plane, Volume};
use mpr_sampler::mip_slab;
use rayon::prelude::*;
use std::sync::mpsc::{Receiver, Sender};
use tracing::{debug, trace};

/// Body of the dedicated MIP worker thread, one per active volume. Blocks on `request_rx`
/// until the sender is dropped (cancellation or process shutdown), at which point the thread
/// returns: a volume switch replaces the whole channel pair, so the disconnect itself is the
/// stop signal.
pub fn run(request_rx: Receiver<Request>, reply_tx: Sender<Reply>) {
    let mut volume: Option<Volume> = None;

    while let Ok(request) = request_rx.recv() {
        match request {
            Request::Init { volume: new_volume } => {
                debug!(
                    "worker received init for volume {:?}",
                    new_volume.dimensions()
                );
                volume = Some(*new_volume);
                if reply_tx.send(Reply::Ready).is_err() {
                    break;
                }
            }
            Request::ComputeSlice { z, slab_half_size, request_id } => {
                let reply = compute_one(volume.as_ref(), z, slab_half_size, request_id);
                if reply_tx.send(reply).is_err() {
                    break;
                }
            }
            Request::ComputeBatch { indices, slab_half_size, request_id } => {
                let Some(vol) = volume.as_ref() else {
                    let _ = reply_tx.send(Reply::NotInitialized { request_id });
                    continue;
                };
                trace!("worker computing batch of {} slices", indices.len());
                let results: Vec<Reply> = indices
                    .par_iter()
                    .map(|&z| compute_one(Some(vol), z, slab_half_size, request_id))
                    .collect();
                for reply in results {
                    if reply_tx.send(reply).is_err() {
                        return;
                    }
                }
            }
        }
    }
}

fn compute_one(volume: Option<&Volume>, z: usize, slab_half_size: usize, request_id: u64) -> Reply {
    let Some(volume) = volume else {
        return Reply::NotInitialized { request_id };
    };
    let (_, _, slices) = volume.dimensions();
    if z >= slices {
        return Reply::Error {
            request_id: Some(request_id),
            message: format!("slice index {z} out of range for {slices} slices"),
        };
    }
    let image = mip_slab(volume, Plane::Axial, z as f64, slab_half_size);
    Reply::SliceResult { z, slab_half_size, request_id, bytes: image.data }
}
