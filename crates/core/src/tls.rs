/// # Summary
/// 安装进程级 rustls 加密后端 (ring)。
///
/// # Logic
/// `reqwest` 以 `rustls-no-provider` 方式编译，出站 HTTPS 之前必须先安装 provider。
/// 重复调用是安全的：已安装时直接返回 `false`。
///
/// # Returns
/// * 本次调用是否完成了安装。
pub fn install_default_provider() -> bool {
    rustls::crypto::ring::default_provider()
        .install_default()
        .is_ok()
}
