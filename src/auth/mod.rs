//
//  ship-cli
//  auth/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Authentication Module
//!
//! Ship scripting access uses a single static API token. This module resolves
//! it (explicit value first, then `SHIP_API_TOKEN`), validates its format and
//! turns it into the `Authorization` header value the client attaches to
//! every request.
//!
//! ## Module Structure
//!
//! - `token`: token resolution, validation and header encoding

mod token;

pub use token::*;
