use std::sync::Arc;

use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use crate::auth::JwtService;
use crate::core::{Config, Result, ServerError};
use crate::db::DbService;
use crate::db::repository::{
    AccountRepository, OrderRepository, RestaurantRepository, RiderRepository,
};
use crate::dispatch::DispatchService;
use crate::events::EventBroadcaster;

/// 服务器状态 - 持有所有服务的单例引用
///
/// ServerState 是进程的核心数据结构，持有所有服务的共享引用。
/// 使用 Arc 实现浅拷贝，克隆成本极低。
///
/// # 服务组件
///
/// | 字段 | 类型 | 说明 |
/// |------|------|------|
/// | config | Config | 配置项 (不可变) |
/// | db | Surreal<Db> | 嵌入式数据库 |
/// | jwt_service | Arc<JwtService> | JWT 认证服务 |
/// | broadcaster | EventBroadcaster | 调度事件广播 |
/// | dispatch | DispatchService | 指派与状态流转引擎 |
#[derive(Clone)]
pub struct ServerState {
    /// 服务器配置
    pub config: Config,
    /// 嵌入式数据库 (SurrealDB)
    pub db: Surreal<Db>,
    /// JWT 认证服务 (Arc 共享所有权)
    pub jwt_service: Arc<JwtService>,
    /// 调度事件广播器
    pub broadcaster: EventBroadcaster,
    /// 调度引擎
    pub dispatch: DispatchService,
    /// 账号仓储
    pub accounts: AccountRepository,
    /// 餐厅仓储
    pub restaurants: RestaurantRepository,
    /// 骑手仓储
    pub riders: RiderRepository,
    /// 订单仓储
    pub orders: OrderRepository,
}

impl ServerState {
    /// 初始化服务器状态
    ///
    /// 按顺序初始化：
    /// 1. 工作目录结构 (确保目录存在)
    /// 2. 数据库 (work_dir/database/dispatch.db, RocksDB)
    /// 3. 各服务 (JWT, Broadcaster, Dispatch, 仓储)
    pub async fn initialize(config: &Config) -> Result<Self> {
        config.ensure_work_dir_structure()?;

        let db_path = config.database_dir().join("dispatch.db");
        let db_service = DbService::new(&db_path.to_string_lossy())
            .await
            .map_err(|e| ServerError::Config(format!("database init failed: {e}")))?;

        Ok(Self::from_parts(config.clone(), db_service))
    }

    /// 基于已打开的数据库构造状态
    ///
    /// 测试用内存数据库时走这里
    pub fn from_parts(config: Config, db_service: DbService) -> Self {
        let db = db_service.db;
        let jwt_service = Arc::new(JwtService::with_config(config.jwt.clone()));
        let broadcaster = EventBroadcaster::new();
        let dispatch = DispatchService::new(db.clone(), broadcaster.clone());

        Self {
            config,
            jwt_service,
            broadcaster,
            dispatch,
            accounts: AccountRepository::new(db.clone()),
            restaurants: RestaurantRepository::new(db.clone()),
            riders: RiderRepository::new(db.clone()),
            orders: OrderRepository::new(db.clone()),
            db,
        }
    }

    /// 获取 JWT 服务
    pub fn get_jwt_service(&self) -> Arc<JwtService> {
        self.jwt_service.clone()
    }

    /// 获取事件广播器
    pub fn broadcaster(&self) -> &EventBroadcaster {
        &self.broadcaster
    }
}
