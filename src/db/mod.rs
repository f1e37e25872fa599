//! # 데이터베이스 접근 계층 (Data Access Layer)
//!
//! 데이터베이스와 직접 상호작용하는 함수들을 모아둔 모듈입니다.
//! 라우트 핸들러(routes/)에서 이 모듈의 함수를 호출하여 DB 작업을 수행합니다.
//!
//! 각 하위 모듈:
//! - `groups`: 그룹 CRUD, 공감, 연쇄 삭제
//! - `posts`: 게시글 CRUD, 공감, 연쇄 삭제, 그룹 카운터 갱신
//! - `comments`: 댓글 CRUD, 게시글 카운터 갱신
//! - `tags`: 태그 find-or-create와 게시글-태그 연결
//! - `listing`: 페이지/정렬/필터 파라미터 해석 (쿼리 빌더 보조)
//!
//! ## 트랜잭션
//! 부모 카운터를 함께 바꾸거나 자식 행을 먼저 지워야 하는 작업은 모두
//! `pool.begin()`으로 연 트랜잭션 안에서 실행하고 마지막에 `commit()`합니다.
//! 중간에 `?`로 빠져나가면 트랜잭션이 drop되면서 자동으로 롤백됩니다.
//! 트랜잭션이 열려 있는 동안에는 `pool`을 다시 쓰지 않습니다
//! (연결이 하나뿐인 풀에서 교착 상태가 됩니다).

pub mod comments;
pub mod groups;
pub mod listing;
pub mod posts;
pub mod tags;

pub use comments::*;
pub use groups::*;
pub use posts::*;
