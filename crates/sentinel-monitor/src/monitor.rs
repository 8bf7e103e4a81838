//! 安全监控器
//!
//! 监控器是 MonitorState 的唯一所有者：保持角度、已验证姿态
//! 列表和有效性标志只被监控器自己的检查周期改写，外部只能通过
//! 线程安全的读取接口观察。
//!
//! # 两种用法
//!
//! - **一次性检查**：`check(angles)` 同步执行全部检查并返回报告。
//! - **连续监控**：`start(source, sink)` 启动一个后台线程，按配置
//!   的采样间隔从角度源拉取角度并检查；首次失败时恰好发出一次
//!   停止指令并退出循环（fail-stop，不重试）。
//!
//! # 状态机
//!
//! `Stopped → Running`（`start`）；`Running → Stopped`（`stop` 或
//! fail-stop）。运行中再次 `start` 先干净地停掉旧循环，绝不留下
//! 两个并发循环。

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Duration;

use arc_swap::ArcSwapOption;
use crossbeam_channel::{Receiver, RecvTimeoutError, Sender, bounded};
use parking_lot::Mutex;
use sentinel_checks::{IntervalError, SafetyProfile};
use sentinel_kinematics::JointAngles;

use crate::error::MonitorError;
use crate::io::{AngleSource, ExternalError, StopCommand, StopSink};
use crate::pipeline::CheckPipeline;
use crate::report::CheckReport;

/// 监控器内部状态
///
/// 只被监控器自己的检查周期改写。
#[derive(Debug, Default)]
struct MonitorState {
    /// 上一周期检查过的角度，速度检查的基准
    hold: Option<JointAngles>,
    /// 累积的已验证姿态
    valid_positions: Vec<JointAngles>,
}

struct MonitorInner {
    pipeline: CheckPipeline,
    state: Mutex<MonitorState>,
    valid: AtomicBool,
    running: AtomicBool,
    last_report: ArcSwapOption<CheckReport>,
    last_external_error: Mutex<Option<ExternalError>>,
}

struct WorkerHandle {
    stop_tx: Sender<()>,
    handle: thread::JoinHandle<()>,
}

/// 安全监控器
pub struct SafetyMonitor {
    inner: Arc<MonitorInner>,
    worker: Option<WorkerHandle>,
}

impl SafetyMonitor {
    /// 从配置档案创建监控器
    ///
    /// 档案在此处一次性验证，之后流水线不可变。
    pub fn new(profile: &SafetyProfile) -> Result<Self, MonitorError> {
        let pipeline = CheckPipeline::from_profile(profile)?;
        Ok(SafetyMonitor {
            inner: Arc::new(MonitorInner {
                pipeline,
                state: Mutex::new(MonitorState::default()),
                valid: AtomicBool::new(true),
                running: AtomicBool::new(false),
                last_report: ArcSwapOption::const_empty(),
                last_external_error: Mutex::new(None),
            }),
            worker: None,
        })
    }

    /// 一次性检查
    ///
    /// 有保持角度时先做速度检查，然后依次检查工作空间、地面和
    /// 自碰撞，按逻辑与合成判定。通过的姿态追加到已验证列表，
    /// 保持角度无条件推进到本次角度。
    pub fn check(&self, angles: &JointAngles) -> Result<CheckReport, MonitorError> {
        Ok(check_cycle(&self.inner, angles)?)
    }

    /// 启动连续监控
    ///
    /// 已在运行时先停止旧循环再启动新循环。角度源和停止端移入
    /// 后台线程，循环退出时随线程释放。
    pub fn start<S, K>(&mut self, source: S, sink: K)
    where
        S: AngleSource + 'static,
        K: StopSink + 'static,
    {
        self.stop();

        let (stop_tx, stop_rx) = bounded::<()>(1);
        let inner = Arc::clone(&self.inner);
        inner.running.store(true, Ordering::Release);
        let interval = Duration::from_secs_f64(inner.pipeline.sample_interval_secs());

        let handle = thread::spawn(move || {
            poll_loop(&inner, source, sink, &stop_rx, interval);
        });

        self.worker = Some(WorkerHandle { stop_tx, handle });
        tracing::info!(interval_secs = interval.as_secs_f64(), "safety monitor started");
    }

    /// 停止连续监控
    ///
    /// 发出停止信号并等待后台线程结束后才返回。未在运行时为
    /// 空操作。
    pub fn stop(&mut self) {
        if let Some(worker) = self.worker.take() {
            // 循环已因 fail-stop 退出时发送会失败，忽略即可
            let _ = worker.stop_tx.try_send(());
            let _ = worker.handle.join();
            tracing::info!("safety monitor stopped");
        }
    }

    /// 后台循环是否仍在运行
    pub fn is_running(&self) -> bool {
        self.inner.running.load(Ordering::Acquire)
    }

    /// 最近一次检查的合成判定
    ///
    /// 尚未检查过任何姿态时为 `true`。
    pub fn is_valid(&self) -> bool {
        self.inner.valid.load(Ordering::Acquire)
    }

    /// 最近一次检查的完整报告
    pub fn last_report(&self) -> Option<Arc<CheckReport>> {
        self.inner.last_report.load_full()
    }

    /// 累积的已验证姿态快照
    pub fn valid_positions(&self) -> Vec<JointAngles> {
        self.inner.state.lock().valid_positions.clone()
    }

    /// 取出并清除最近一次外部协作者错误
    pub fn take_external_error(&self) -> Option<ExternalError> {
        self.inner.last_external_error.lock().take()
    }

    /// 检查流水线
    pub fn pipeline(&self) -> &CheckPipeline {
        &self.inner.pipeline
    }
}

impl Drop for SafetyMonitor {
    fn drop(&mut self) {
        self.stop();
    }
}

/// 执行一个检查周期并更新监控状态
fn check_cycle(inner: &MonitorInner, angles: &JointAngles) -> Result<CheckReport, IntervalError> {
    let mut state = inner.state.lock();
    let report = match state.hold {
        Some(hold) => inner.pipeline.check_pose_against(angles, &hold)?,
        None => inner.pipeline.check_pose(angles),
    };
    if report.valid {
        state.valid_positions.push(*angles);
    }
    state.hold = Some(*angles);
    drop(state);

    inner.valid.store(report.valid, Ordering::Release);
    inner.last_report.store(Some(Arc::new(report.clone())));
    Ok(report)
}

/// 后台轮询循环
///
/// 每个周期：拉取角度、检查、失败即停。周期间用 `recv_timeout`
/// 等待采样间隔，停止信号随时打断等待。
fn poll_loop(
    inner: &MonitorInner,
    mut source: impl AngleSource,
    mut sink: impl StopSink,
    stop_rx: &Receiver<()>,
    interval: Duration,
) {
    loop {
        let angles = match source.current_angles() {
            Ok(angles) => angles,
            Err(err) => {
                tracing::error!(error = %err, "angle source failed, halting monitor");
                *inner.last_external_error.lock() = Some(err);
                break;
            }
        };

        let report = match check_cycle(inner, &angles) {
            Ok(report) => report,
            Err(err) => {
                // 采样间隔在构建时已验证为正，此分支不可达
                tracing::error!(error = %err, "check cycle failed, halting monitor");
                break;
            }
        };
        tracing::debug!(valid = report.valid, "monitor cycle completed");

        if !report.valid {
            tracing::warn!(summary = %report.summary(), "unsafe pose detected, issuing stop");
            if let Err(err) = sink.issue_stop(&StopCommand::reference()) {
                tracing::error!(error = %err, "stop sink failed");
                *inner.last_external_error.lock() = Some(err);
            }
            break;
        }

        match stop_rx.recv_timeout(interval) {
            Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
            Err(RecvTimeoutError::Timeout) => {}
        }
    }
    inner.running.store(false, Ordering::Release);
}
