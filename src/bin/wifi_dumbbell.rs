use clap::Parser;
use std::fs;
use std::net::Ipv6Addr;
use std::path::PathBuf;
use wifi_dumbbell::addr::Ipv6Prefix;
use wifi_dumbbell::net::RateAdaptation;
use wifi_dumbbell::plan::TopologyPlan;
use wifi_dumbbell::scenario::{BoundingBox, Ipv6Spec, ScenarioSpec, TcpVariant, build_scenario};
use wifi_dumbbell::units::SimTime;

#[derive(Debug, Parser)]
#[command(
    name = "wifi-dumbbell",
    about = "Build a wireless/point-to-point dumbbell scenario and export its plan"
)]
struct Args {
    /// Path to scenario.json (all fields optional)
    #[arg(long)]
    scenario: Option<PathBuf>,

    /// Number of wireless leaves on the left side
    #[arg(long)]
    n_left: Option<usize>,

    /// Number of wired leaves on the right side
    #[arg(long)]
    n_right: Option<usize>,

    /// TCP variant: westwood, westwoodplus or newreno
    #[arg(long)]
    tcp_variant: Option<TcpVariant>,

    /// Rate adaptation algorithm: arf, aarf, ideal or minstrel
    #[arg(long)]
    raa_algo: Option<RateAdaptation>,

    /// Application run time, e.g. 20s or 1500ms
    #[arg(long)]
    simulation_time: Option<SimTime>,

    /// Layout rectangle as ulx,uly,lrx,lry
    #[arg(long, allow_hyphen_values = true)]
    bounding_box: Option<BoundingBox>,

    /// Also assign IPv6 addresses from 2001:db8::/64
    #[arg(long)]
    ipv6: bool,

    /// Output plan JSON file
    #[arg(long)]
    plan_json: Option<PathBuf>,
}

fn main() {
    // 初始化 tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_file(true)
        .with_line_number(true)
        .with_target(true)
        .init();

    let args = Args::parse();

    let mut spec = match &args.scenario {
        Some(path) => {
            let raw = fs::read_to_string(path).expect("read scenario.json");
            serde_json::from_str::<ScenarioSpec>(&raw).expect("parse scenario.json")
        }
        None => ScenarioSpec::default(),
    };

    // 命令行参数覆盖文件里的配置
    if let Some(n) = args.n_left {
        spec.n_left = n;
    }
    if let Some(n) = args.n_right {
        spec.n_right = n;
    }
    if let Some(v) = args.tcp_variant {
        spec.tcp_variant = v;
    }
    if let Some(raa) = args.raa_algo {
        spec.wifi.rate_adaptation = raa;
    }
    if let Some(t) = args.simulation_time {
        spec.simulation_time = t;
    }
    if let Some(bb) = args.bounding_box {
        spec.bounding_box = Some(bb);
    }
    if args.ipv6 && spec.ipv6.is_none() {
        spec.ipv6 = Some(Ipv6Spec {
            base: Ipv6Addr::new(0x2001, 0xdb8, 0, 0, 0, 0, 0, 0),
            prefix: Ipv6Prefix::new(64).expect("valid prefix"),
        });
    }

    let sc = build_scenario(&spec).expect("build scenario");

    println!(
        "wifi dumbbell: {} wireless leaves ({} / {}), {} wired leaves, tcp={}",
        sc.topo.left_count(),
        spec.wifi.standard,
        spec.wifi.rate_adaptation.manager_type(),
        sc.topo.right_count(),
        spec.tcp_variant.socket_type(),
    );
    println!(
        "  router link  {} <-> {}",
        sc.topo.router_interfaces().address(0),
        sc.topo.router_interfaces().address(1)
    );
    println!("  access point {}", sc.topo.left_router_interfaces().address(0));
    for i in 0..sc.topo.left_count() {
        println!("  left[{i}]      {}", sc.topo.left_ipv4_address(i));
    }
    for i in 0..sc.topo.right_count() {
        println!(
            "  right[{i}]     {} (router side {})",
            sc.topo.right_ipv4_address(i),
            sc.topo.right_router_interfaces().address(i)
        );
    }
    if spec.ipv6.is_some() {
        for i in 0..sc.topo.left_count() {
            println!("  left6[{i}]     {}", sc.topo.left_ipv6_address(i));
        }
        for i in 0..sc.topo.right_count() {
            println!("  right6[{i}]    {}", sc.topo.right_ipv6_address(i));
        }
    }
    for s in &sc.traffic.senders {
        let src = sc.net.node(s.node).name();
        let hops: Vec<&str> = s.path.iter().map(|&n| sc.net.node(n).name()).collect();
        println!("  flow {src} -> {} via {}", s.remote, hops.join(" > "));
    }
    println!("  stop at {}", sc.traffic.stop_time);

    if let Some(path) = args.plan_json {
        let plan = TopologyPlan::from_scenario(&sc);
        let json = serde_json::to_string_pretty(&plan).expect("serialize plan");
        fs::write(&path, json).expect("write plan json");
        eprintln!("wrote plan to {}", path.display());
    }
}
