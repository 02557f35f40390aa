//! Single-threaded, time-ordered event scheduler driving a simulation run.

use std::cell::RefCell;
use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap};
use std::rc::Rc;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{info, trace};

use crate::agents::Agent;
use crate::config::SimConfig;
use crate::environment::{Action, Environment, Scheduled};
use crate::fair_value::FairValue;
use crate::logger::Logger;
use crate::orderbook::{Order, OrderBook, Side, Time};

use super::event::{Event, QueuedEvent};

/// Owns the event queue, current time, sequence counter, agent registry,
/// and references to the book and logger. The only mutable shared
/// resource in a run is the book, and it is touched only from here.
pub struct Engine {
    config: SimConfig,
    book: OrderBook,
    environment: Environment,
    agents: HashMap<String, Box<dyn Agent>>,
    fair_value: Rc<RefCell<FairValue>>,
    logger: Box<dyn Logger>,
    queue: BinaryHeap<Reverse<QueuedEvent>>,
    time: Time,
    seq: u64,
    running: bool,
    agent_rng: ChaCha8Rng,
    latency_rng: ChaCha8Rng,
    fair_value_rng: ChaCha8Rng,
}

impl Engine {
    /// Builds a ready-to-run engine: schedules every agent's first
    /// arrival, the first snapshot, the first fair-value step, and the
    /// market close at `config.horizon`.
    ///
    /// `fair_value` is shared with any agent constructed to read it (e.g.
    /// [`crate::agents::NoiseTraderAgent`]) — pass the same `Rc` used to
    /// build those agents so the engine's steps are visible to them.
    pub fn new(
        config: SimConfig,
        fair_value: Rc<RefCell<FairValue>>,
        agents: Vec<Box<dyn Agent>>,
        logger: Box<dyn Logger>,
    ) -> Self {
        let environment = Environment::new(config.clone());
        let mut engine = Self {
            book: OrderBook::new(),
            environment,
            agents: agents.into_iter().map(|a| (a.id().to_string(), a)).collect(),
            fair_value,
            logger,
            queue: BinaryHeap::new(),
            time: 0.0,
            seq: 0,
            running: true,
            agent_rng: ChaCha8Rng::seed_from_u64(config.seed),
            latency_rng: ChaCha8Rng::seed_from_u64(config.seed.wrapping_add(1)),
            fair_value_rng: ChaCha8Rng::seed_from_u64(config.seed.wrapping_add(2)),
            config,
        };
        engine.bootstrap();
        engine
    }

    fn bootstrap(&mut self) {
        let agent_ids: Vec<String> = self.agents.keys().cloned().collect();
        for agent_id in agent_ids {
            let next = self.agents[&agent_id].next_event_time(self.time, &mut self.agent_rng);
            self.schedule(next, Event::AgentArrival { agent_id });
        }
        self.schedule(
            self.time + self.config.snapshot_interval,
            Event::Snapshot {
                depth: self.config.snapshot_depth,
            },
        );
        self.schedule(
            self.time + self.config.fair_value_dt,
            Event::FairValueUpdate {
                dt: self.config.fair_value_dt,
            },
        );
        self.schedule(self.config.horizon, Event::MarketClose);
    }

    /// Pushes `event` at `time`, stamped with the next insertion sequence.
    pub fn schedule(&mut self, time: Time, event: Event) {
        let seq = self.seq;
        self.seq += 1;
        self.queue.push(Reverse(QueuedEvent { time, seq, event }));
    }

    /// Current simulation time: the timestamp of the most recently
    /// dispatched event.
    pub fn time(&self) -> Time {
        self.time
    }

    /// The book being driven by this run.
    pub fn book(&self) -> &OrderBook {
        &self.book
    }

    /// The logger this run records into.
    pub fn logger(&self) -> &dyn Logger {
        self.logger.as_ref()
    }

    /// Current signed inventory of a registered agent, or `None` if no
    /// agent with that id was registered.
    pub fn agent_inventory(&self, agent_id: &str) -> Option<f64> {
        self.agents.get(agent_id).map(|a| a.inventory())
    }

    /// Drains the event queue, dispatching in non-decreasing `(time,
    /// seq)` order, until the queue is empty or a `MarketCloseEvent`
    /// clears `running`.
    pub fn run(&mut self) {
        info!(horizon = self.config.horizon, "engine run started");
        while self.running {
            let Some(Reverse(queued)) = self.queue.pop() else {
                break;
            };
            debug_assert!(queued.time >= self.time, "engine time must not regress");
            self.time = queued.time;
            self.dispatch(queued.event);
        }
        info!(time = self.time, "engine run stopped");
    }

    fn dispatch(&mut self, event: Event) {
        match event {
            Event::AgentArrival { agent_id } => self.handle_agent_arrival(agent_id),
            Event::OrderSubmission { order } => self.handle_order_submission(order),
            Event::Snapshot { depth } => self.handle_snapshot(depth),
            Event::FairValueUpdate { dt } => self.handle_fair_value_update(dt),
            Event::MarketClose => self.handle_market_close(),
        }
    }

    fn handle_agent_arrival(&mut self, agent_id: String) {
        let Some(agent) = self.agents.get_mut(&agent_id) else {
            return;
        };
        let next = agent.next_event_time(self.time, &mut self.agent_rng);
        self.schedule(next, Event::AgentArrival { agent_id: agent_id.clone() });

        let state = self.environment.get_market_state(&self.book);
        let actions = self
            .agents
            .get_mut(&agent_id)
            .expect("agent just looked up by this id")
            .get_action(&state, &mut self.agent_rng);

        for action in actions {
            self.apply_action(&agent_id, action);
        }

        if self.config.cancel_prob > 0.0 {
            self.book.cancel_random(self.config.cancel_prob, &mut self.agent_rng);
        }
    }

    fn apply_action(&mut self, agent_id: &str, action: Action) {
        let is_limit_place = matches!(action, Action::PlaceLimit { .. });
        let cancelled_id = match &action {
            Action::Cancel { order_id } => Some(order_id.clone()),
            _ => None,
        };
        let scheduled =
            self.environment
                .apply_action(&mut self.book, agent_id, action, self.time, &mut self.latency_rng);

        if let Some(order_id) = cancelled_id {
            if let Some(agent) = self.agents.get_mut(agent_id) {
                agent.remove_active_order(&order_id);
            }
        }

        if let Scheduled::OrderSubmission { time, order } = scheduled {
            if is_limit_place {
                if let Some(agent) = self.agents.get_mut(agent_id) {
                    agent.record_active_order(order.order_id.clone(), order.qty);
                }
            }
            trace!(order_id = %order.order_id, at = time, "order submission scheduled");
            self.schedule(time, Event::OrderSubmission { order });
        }
    }

    fn handle_order_submission(&mut self, mut order: Order) {
        order.timestamp = self.time;
        let trades = self.book.submit(order);
        for trade in trades {
            for side in [Side::Buy, Side::Sell] {
                let order_id = trade.order_id_for(side).to_string();
                let agent_id = Order::owning_agent_id(&order_id).to_string();
                if let Some(agent) = self.agents.get_mut(&agent_id) {
                    agent.on_trade(&trade, side);
                    if self.book.resting_qty_of(&order_id) == 0 {
                        agent.remove_active_order(&order_id);
                    }
                }
            }
            self.logger.record_trade(trade);
        }
    }

    fn handle_snapshot(&mut self, depth: usize) {
        let snapshot = self.book.current_snapshot();
        if let (Some(best_bid), Some(best_ask)) = (snapshot.best_bid(), snapshot.best_ask()) {
            self.logger.record_l1(self.time, best_bid, best_ask);
            let (bids, asks) = snapshot.top(depth);
            self.logger.record_l2(
                self.time,
                bids.iter().map(|l| (l.price, l.qty)).collect(),
                asks.iter().map(|l| (l.price, l.qty)).collect(),
            );
        }
        for (agent_id, agent) in &self.agents {
            self.logger.record_inventory(self.time, agent_id, agent.inventory());
        }
        if self.running {
            self.schedule(
                self.time + self.config.snapshot_interval,
                Event::Snapshot { depth },
            );
        }
    }

    fn handle_fair_value_update(&mut self, dt: f64) {
        self.fair_value.borrow_mut().step(&mut self.fair_value_rng);
        self.schedule(self.time + dt, Event::FairValueUpdate { dt });
    }

    fn handle_market_close(&mut self) {
        self.running = false;
        self.queue.clear();
    }
}
