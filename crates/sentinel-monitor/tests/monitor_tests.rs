//! 监控器集成测试
//!
//! 用脚本化的角度源和计数停止端验证后台监控的线程行为：
//! fail-stop 恰好发一次停止指令、stop() 及时返回、重复 start
//! 干净重启、外部失败中止循环。

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;
use std::time::{Duration, Instant};

use sentinel_checks::{LinkPair, SafetyProfile};
use sentinel_kinematics::JointAngles;
use sentinel_monitor::{
    AngleSource, CheckPipeline, ExternalError, SafetyMonitor, SegmentVerdict, StopCommand,
    StopSink, waypoints,
};

/// 全部检查通过的参考姿态
const POSE_REACH: [f64; 6] = [0.9509, -1.6623, 0.6353, -0.5976, -1.5722, 0.0];
/// 肘部外摆姿态，违反 (1, 3) 间隙且末端贴地
const POSE_ELBOW_SWUNG: [f64; 6] = [0.9509, -1.6623, 2.6353, 0.5976, 1.5722, 0.0];

/// 按脚本依次返回姿态的角度源，走完脚本后重复最后一个
struct ScriptedSource {
    poses: Vec<[f64; 6]>,
    next: usize,
}

impl ScriptedSource {
    fn new(poses: Vec<[f64; 6]>) -> Self {
        ScriptedSource { poses, next: 0 }
    }

    fn constant(pose: [f64; 6]) -> Self {
        Self::new(vec![pose])
    }
}

impl AngleSource for ScriptedSource {
    fn current_angles(&mut self) -> Result<JointAngles, ExternalError> {
        let index = self.next.min(self.poses.len() - 1);
        self.next += 1;
        Ok(JointAngles::from_radians(self.poses[index]))
    }
}

/// 第一次交互就失败的角度源
struct FailingSource;

impl AngleSource for FailingSource {
    fn current_angles(&mut self) -> Result<JointAngles, ExternalError> {
        Err(ExternalError::new("feedback timeout"))
    }
}

/// 记录停止指令次数的停止端
struct CountingSink {
    stops: Arc<AtomicUsize>,
}

impl CountingSink {
    fn new() -> (Self, Arc<AtomicUsize>) {
        let stops = Arc::new(AtomicUsize::new(0));
        (
            CountingSink {
                stops: Arc::clone(&stops),
            },
            stops,
        )
    }
}

impl StopSink for CountingSink {
    fn issue_stop(&mut self, _command: &StopCommand) -> Result<(), ExternalError> {
        self.stops.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

/// 测试用快速采样档案
fn fast_profile() -> SafetyProfile {
    SafetyProfile {
        sample_interval_secs: 0.005,
        ..SafetyProfile::reference()
    }
}

fn wait_until(deadline: Duration, mut predicate: impl FnMut() -> bool) -> bool {
    let start = Instant::now();
    while start.elapsed() < deadline {
        if predicate() {
            return true;
        }
        thread::sleep(Duration::from_millis(2));
    }
    predicate()
}

#[test]
fn test_fail_stop_issues_exactly_one_stop_command() {
    init_tracing();
    let mut monitor = SafetyMonitor::new(&fast_profile()).unwrap();
    // 两个安全周期后进入不安全姿态
    let source = ScriptedSource::new(vec![POSE_REACH, POSE_REACH, [0.0; 6]]);
    let (sink, stops) = CountingSink::new();

    monitor.start(source, sink);
    assert!(
        wait_until(Duration::from_secs(2), || !monitor.is_running()),
        "monitor should halt after the unsafe pose"
    );

    // 再等几个周期，确认循环确实退出而不是继续发停止指令
    thread::sleep(Duration::from_millis(50));
    assert_eq!(stops.load(Ordering::SeqCst), 1);
    assert!(!monitor.is_valid());
    assert_eq!(monitor.valid_positions().len(), 2);
    let report = monitor.last_report().unwrap();
    assert!(!report.valid);
}

#[test]
fn test_stop_joins_promptly() {
    let mut monitor = SafetyMonitor::new(&fast_profile()).unwrap();
    let (sink, stops) = CountingSink::new();
    monitor.start(ScriptedSource::constant(POSE_REACH), sink);

    thread::sleep(Duration::from_millis(30));
    assert!(monitor.is_running());

    let start = Instant::now();
    monitor.stop();
    assert!(start.elapsed() < Duration::from_millis(500));

    assert!(!monitor.is_running());
    assert_eq!(stops.load(Ordering::SeqCst), 0);
    assert!(monitor.is_valid());
    assert!(!monitor.valid_positions().is_empty());
}

#[test]
fn test_restart_replaces_previous_loop() {
    let mut monitor = SafetyMonitor::new(&fast_profile()).unwrap();
    let (first_sink, first_stops) = CountingSink::new();
    let (second_sink, second_stops) = CountingSink::new();

    monitor.start(ScriptedSource::constant(POSE_REACH), first_sink);
    thread::sleep(Duration::from_millis(20));

    // 运行中再次 start 必须先停掉旧循环
    monitor.start(ScriptedSource::constant(POSE_REACH), second_sink);
    assert!(monitor.is_running());
    thread::sleep(Duration::from_millis(20));

    monitor.stop();
    assert!(!monitor.is_running());
    assert_eq!(first_stops.load(Ordering::SeqCst), 0);
    assert_eq!(second_stops.load(Ordering::SeqCst), 0);
}

#[test]
fn test_source_failure_halts_without_stop_command() {
    init_tracing();
    let mut monitor = SafetyMonitor::new(&fast_profile()).unwrap();
    let (sink, stops) = CountingSink::new();

    monitor.start(FailingSource, sink);
    assert!(
        wait_until(Duration::from_secs(2), || !monitor.is_running()),
        "monitor should halt after the source failure"
    );

    assert_eq!(stops.load(Ordering::SeqCst), 0);
    let error = monitor.take_external_error().unwrap();
    assert!(error.reason.contains("feedback timeout"));
    assert!(monitor.take_external_error().is_none());
}

#[test]
fn test_drop_while_running_joins_worker() {
    let mut monitor = SafetyMonitor::new(&fast_profile()).unwrap();
    let (sink, _stops) = CountingSink::new();
    monitor.start(ScriptedSource::constant(POSE_REACH), sink);
    thread::sleep(Duration::from_millis(20));
    drop(monitor);
}

#[test]
fn test_zero_sample_interval_rejected() {
    let profile = SafetyProfile {
        sample_interval_secs: 0.0,
        ..SafetyProfile::reference()
    };
    assert!(SafetyMonitor::new(&profile).is_err());
}

#[test]
fn test_waypoint_capture_replay_flags_unsafe_pose() {
    let content = r#"{
        "modTraj": [
            {"positions": [0.9509, -1.6623, 0.6353, -0.5976, -1.5722, 0.0]},
            {"positions": [0.9509, -1.6623, 2.6353, 0.5976, 1.5722, 0.0]}
        ]
    }"#;
    let poses = waypoints::parse_waypoints(content).unwrap();
    assert_eq!(poses.len(), 2);

    let monitor = SafetyMonitor::new(&SafetyProfile::reference()).unwrap();
    assert!(monitor.check(&poses[0]).unwrap().valid);
    assert!(!monitor.check(&poses[1]).unwrap().valid);
    assert_eq!(monitor.valid_positions(), vec![poses[0]]);
}

/// 两端点都通过、中间姿态瞬时违规的段验证场景
///
/// 放宽 (1, 3) 间隙和地面余量后两个端点姿态各自通过全部检查，
/// 但按最短路径插值的路径在接近终点处 (1, 5) 间隙跌破 0.08 m，
/// 整段必须被拒绝。
#[test]
fn test_transient_violation_rejects_segment_with_safe_endpoints() {
    let mut profile = SafetyProfile::reference();
    for entry in &mut profile.safe_distances {
        if entry.a == 1 && entry.b == 3 {
            entry.min_clearance = 0.04;
        }
    }
    profile.ground.margin = 0.01;

    let pipeline = CheckPipeline::from_profile(&profile).unwrap();
    let start = JointAngles::from_radians(POSE_REACH);
    let end = JointAngles::from_radians(POSE_ELBOW_SWUNG);

    assert!(pipeline.check_pose(&start).valid);
    assert!(pipeline.check_pose(&end).valid);

    match pipeline.validate_segment(&start, &end).unwrap() {
        SegmentVerdict::Rejected { index, report } => {
            assert!(index > 0 && index < 100, "index: {index}");
            assert!(report.workspace_ok);
            assert!(report.ground_flagged.is_empty());
            let wrist_pair = LinkPair::new(1, 5).unwrap();
            assert!(!report.collision.get(wrist_pair).unwrap().safe);
        }
        verdict => panic!("expected rejection, got {verdict:?}"),
    }
}
