// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use statebench_core::ChangeStatePolicy;
use statebench_infra::RecordingDevice;
use statebench_lanes::RenderBackend;

/// CPU cost of one `draw()` per policy: what the backend spends deciding and
/// issuing commands, with a device that only counts them.
fn bench_draw(c: &mut Criterion) {
    let mut group = c.benchmark_group("RenderBackend::draw");

    for (triangles_per_batch, budget) in [(10u32, 40_000u32), (1000, 4_000_000)] {
        for policy in ChangeStatePolicy::ALL {
            let mut backend = RenderBackend::new(RecordingDevice::counting(), 1980, 1080, 1)
                .expect("the counting device never fails");
            backend
                .configure(triangles_per_batch, budget, policy)
                .expect("valid configuration");

            group.bench_function(format!("{policy} / {triangles_per_batch} tri per batch"), |b| {
                b.iter(|| {
                    backend.draw();
                    black_box(backend.last_frame_stats());
                });
            });
        }
    }

    group.finish();
}

criterion_group!(benches, bench_draw);
criterion_main!(benches);
